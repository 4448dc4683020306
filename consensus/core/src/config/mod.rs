pub mod constants;

use crate::errors::config::{ConfigError, ConfigResult};
use constants::ProtocolConstants;
use serde::Deserialize;
use std::{fs, path::Path};

/// Declarative constants source. Every key is required; options only exist so
/// that a missing key is reported by name rather than as a generic parse error.
#[derive(Debug, Default, Deserialize)]
struct ConstantsSource {
    k: Option<u64>,
    delta: Option<u64>,
    slots_per_epoch: Option<u64>,
    slots_per_sub_window: Option<u64>,
    sub_windows_per_window: Option<u64>,
    /// Slot duration (milliseconds)
    block_window_duration: Option<u64>,
}

fn required(value: Option<u64>, key: &'static str) -> ConfigResult<u64> {
    value.ok_or(ConfigError::MissingKey(key))
}

impl TryFrom<ConstantsSource> for ProtocolConstants {
    type Error = ConfigError;

    fn try_from(source: ConstantsSource) -> ConfigResult<Self> {
        ProtocolConstants::new(
            required(source.k, "k")?,
            required(source.delta, "delta")?,
            required(source.slots_per_epoch, "slots_per_epoch")?,
            required(source.slots_per_sub_window, "slots_per_sub_window")?,
            required(source.sub_windows_per_window, "sub_windows_per_window")?,
            required(source.block_window_duration, "block_window_duration")?,
        )
    }
}

/// Parses protocol constants from a TOML document
pub fn parse_constants(toml: &str) -> ConfigResult<ProtocolConstants> {
    let source: ConstantsSource = toml::from_str(toml).map_err(|err| ConfigError::Parse(err.message().to_string()))?;
    source.try_into()
}

/// Loads protocol constants from a TOML file. Intended to be called once at start-up;
/// any error should abort the process.
pub fn load_constants(path: impl AsRef<Path>) -> ConfigResult<ProtocolConstants> {
    let path = path.as_ref();
    let toml = fs::read_to_string(path).map_err(|err| ConfigError::Io(path.display().to_string(), err.to_string()))?;
    parse_constants(&toml)
}
