pub mod best_tip;
pub mod chain_selection;
pub mod range;
pub mod vrf;
pub mod window_density;
