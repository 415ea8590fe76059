//! TOML file source

use crate::config::DEFAULT_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::Path;

/// Add an explicit config file; it must exist
pub fn add_required(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).format(FileFormat::Toml).required(true))
}

/// Add `heavylist.toml` from `dir` when present
pub fn add_default(builder: ConfigBuilder<DefaultState>, dir: &Path) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        File::from(dir.join(DEFAULT_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false),
    )
}
