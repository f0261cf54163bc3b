//! Merge an arbitrary YAML fragment into a manifest file.

use std::path::Path;

use crate::domain::AppError;
use crate::domain::manifest::ManifestDocument;
use crate::ports::ManifestStore;
use crate::services::manifest_merger::{self, MergePlan};

pub fn execute<S: ManifestStore>(
    store: &S,
    target: &Path,
    fragment: &str,
) -> Result<MergePlan, AppError> {
    let document = ManifestDocument::from_yaml(fragment).map_err(|err| match err {
        AppError::Serialize(err) => AppError::config_error(format!("Invalid fragment: {err}")),
        other => other,
    })?;
    manifest_merger::merge(store, target, document)
}
