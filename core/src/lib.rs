extern crate self as zkarchive_core;

pub mod log;
pub mod span;
