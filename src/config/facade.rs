//! ConfigLoader facade over the layered sources.

use super::sources::{environment, file};
use super::HeavylistConfig;
use config::{Config, ConfigError, Map};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence, lowest first: defaults, `explicit` file (or
    /// `heavylist.toml` in `working_dir` when present), environment.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<HeavylistConfig, ConfigError> {
        Self::load_with_env(explicit, working_dir, None)
    }

    pub(crate) fn load_with_env(
        explicit: Option<&Path>,
        working_dir: &Path,
        vars: Option<Map<String, String>>,
    ) -> Result<HeavylistConfig, ConfigError> {
        let builder = Config::builder();
        let builder = match explicit {
            Some(path) => file::add_required(builder, path),
            None => file::add_default(builder, working_dir),
        };
        let builder = environment::add_to_builder(builder, vars);

        builder.build()?.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> HeavylistConfig {
        HeavylistConfig::default()
    }
}
