//! Environment variable source: HEAVYLIST_ prefix with __ between nested keys

use crate::config::ENV_PREFIX;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};

/// Add the environment overlay to `builder`.
///
/// `HEAVYLIST_SEARCH__MAX_DEPTH=64` sets `search.max_depth`. Pass `vars` to
/// read from a fixed map instead of the process environment.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars),
    )
}
