//! Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `HEAVYLIST_*` environment variables.

pub mod facade;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::search::SearchOptions;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "heavylist.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HEAVYLIST";

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeavylistConfig {
    pub search: SearchOptions,
    pub logging: LoggingConfig,
}
