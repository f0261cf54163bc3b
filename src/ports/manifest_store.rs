use std::path::Path;

use crate::domain::AppError;

/// Port for reading and writing manifest files.
///
/// Paths are relative to the store root.
pub trait ManifestStore {
    /// Read a manifest; `Ok(None)` when the file does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>, AppError>;

    /// Replace the manifest at `path` with `content`, creating parent
    /// directories as needed. The replacement is all-or-nothing.
    fn write(&self, path: &Path, content: &str) -> Result<(), AppError>;
}
