use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration: cannot read constants source {0}: {1}")]
    Io(String, String),

    #[error("Configuration: malformed constants source: {0}")]
    Parse(String),

    #[error("Configuration: required constant `{0}` is missing")]
    MissingKey(&'static str),

    #[error("Configuration: constant `{0}` must be greater than zero")]
    ZeroValue(&'static str),

    #[error("Configuration: slots_per_epoch ({0}) must be divisible by 3")]
    SlotsPerEpochNotDivisibleByThree(u64),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
