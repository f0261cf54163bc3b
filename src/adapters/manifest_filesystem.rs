use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::domain::AppError;
use crate::ports::ManifestStore;

/// Filesystem-backed manifest store rooted at a project directory.
///
/// Paths are validated against the root to prevent directory traversal.
#[derive(Debug, Clone)]
pub struct FilesystemManifestStore {
    root: PathBuf,
}

impl FilesystemManifestStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at the current working directory.
    pub fn current() -> Result<Self, AppError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, AppError> {
        let full_path = if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) };
        let normalized_path = normalize_path(&full_path);
        if !normalized_path.starts_with(normalize_path(&self.root)) {
            return Err(AppError::PathTraversal(path.display().to_string()));
        }
        Ok(normalized_path)
    }
}

impl ManifestStore for FilesystemManifestStore {
    fn read(&self, path: &Path) -> Result<Option<String>, AppError> {
        let full_path = self.resolve(path)?;
        match fs::read_to_string(&full_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full_path = self.resolve(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = temp_path_for(&full_path)?;
        if let Err(err) = fs::write(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&temp_path, &full_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

/// Hidden sibling of `path` used as the staging file of an atomic write.
fn temp_path_for(path: &Path) -> Result<PathBuf, AppError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::config_error(format!("Not a file path: {}", path.display())))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Normalize path by resolving `.` and `..` components logically.
/// This does not access the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }
    normalized
}
