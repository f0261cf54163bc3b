//! Configuration file loading.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::configuration::CONFIG_FILE;
use crate::domain::{AppError, KubescribeConfig};

/// Load the configuration for the project at `root`.
///
/// An explicit path must exist. Without one, `kubescribe.toml` at the root is
/// used when present and defaults apply otherwise.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<KubescribeConfig, AppError> {
    let (path, required) = match explicit {
        Some(path) if path.is_absolute() => (path.to_path_buf(), true),
        Some(path) => (root.join(path), true),
        None => (root.join(CONFIG_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "Loaded configuration");
            KubescribeConfig::parse_toml(&content)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(KubescribeConfig::default())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(AppError::config_error(format!(
            "Configuration file not found: {}",
            path.display()
        ))),
        Err(err) => Err(err.into()),
    }
}
