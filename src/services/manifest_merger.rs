//! Read-modify-write of manifest files through a [`ManifestStore`].
//!
//! Merging is split in two steps so a caller can compute every plan before
//! touching the disk: [`plan`] reads and merges, [`commit`] writes.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::AppError;
use crate::domain::manifest::ManifestDocument;
use crate::domain::merge::merge_documents;
use crate::ports::ManifestStore;

/// What happened, or will happen, to a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
    Unchanged,
}

impl MergeOutcome {
    pub fn label(self) -> &'static str {
        match self {
            MergeOutcome::Created => "created",
            MergeOutcome::Updated => "updated",
            MergeOutcome::Unchanged => "unchanged",
        }
    }
}

/// Merged content of one file, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    pub path: PathBuf,
    pub content: String,
    pub outcome: MergeOutcome,
}

/// Merge `incoming` with the current content of `path`.
///
/// Absent and empty files take `incoming` as is. Content that is not a
/// single YAML mapping fails with `MalformedExistingManifest`.
pub fn plan<S: ManifestStore>(
    store: &S,
    path: &Path,
    incoming: ManifestDocument,
) -> Result<MergePlan, AppError> {
    let current = store.read(path)?;
    let existing = match current.as_deref() {
        Some(content) => parse_existing(path, content)?,
        None => None,
    };

    let (merged, outcome) = match existing {
        Some(existing) => (merge_documents(existing, incoming), MergeOutcome::Updated),
        None => (incoming, MergeOutcome::Created),
    };
    let content = merged.to_yaml()?;
    let outcome = match current {
        Some(current) if current == content => MergeOutcome::Unchanged,
        _ => outcome,
    };
    Ok(MergePlan { path: path.to_path_buf(), content, outcome })
}

/// Write a planned merge; unchanged files are not rewritten.
pub fn commit<S: ManifestStore>(store: &S, plan: &MergePlan) -> Result<(), AppError> {
    if plan.outcome == MergeOutcome::Unchanged {
        debug!(path = %plan.path.display(), "Manifest unchanged");
        return Ok(());
    }
    store.write(&plan.path, &plan.content)?;
    info!(path = %plan.path.display(), outcome = plan.outcome.label(), "Wrote manifest");
    Ok(())
}

/// Plan and commit a single file.
pub fn merge<S: ManifestStore>(
    store: &S,
    path: &Path,
    incoming: ManifestDocument,
) -> Result<MergePlan, AppError> {
    let plan = plan(store, path, incoming)?;
    commit(store, &plan)?;
    Ok(plan)
}

fn parse_existing(path: &Path, content: &str) -> Result<Option<ManifestDocument>, AppError> {
    let malformed = |details: String| AppError::MalformedExistingManifest {
        path: path.display().to_string(),
        details,
    };
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|err| malformed(err.to_string()))?;
    match value {
        serde_yaml::Value::Null => Ok(None),
        value => ManifestDocument::from_value(value)
            .map(Some)
            .ok_or_else(|| malformed("document root is not a mapping".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryManifestStore;

    fn doc(text: &str) -> ManifestDocument {
        ManifestDocument::from_yaml(text).unwrap()
    }

    #[test]
    fn absent_file_is_created_with_incoming_document() {
        let store = MemoryManifestStore::default();
        let path = Path::new("kubernetes/web/service.yml");
        let plan = merge(&store, path, doc("kind: Service\n")).unwrap();

        assert_eq!(plan.outcome, MergeOutcome::Created);
        assert_eq!(store.get(path).as_deref(), Some("kind: Service\n"));
    }

    #[test]
    fn unrelated_keys_survive_and_rerun_is_unchanged() {
        let store = MemoryManifestStore::default();
        let path = Path::new("web.yml");
        store.insert(path, "X: foo\nkind: Old\n");

        let first = merge(&store, path, doc("kind: Deployment\n")).unwrap();
        assert_eq!(first.outcome, MergeOutcome::Updated);
        assert_eq!(store.get(path).as_deref(), Some("X: foo\nkind: Deployment\n"));

        let second = merge(&store, path, doc("kind: Deployment\n")).unwrap();
        assert_eq!(second.outcome, MergeOutcome::Unchanged);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn empty_file_counts_as_absent() {
        let store = MemoryManifestStore::default();
        let path = Path::new("empty.yml");
        store.insert(path, "");
        let plan = plan(&store, path, doc("a: 1\n")).unwrap();
        assert_eq!(plan.outcome, MergeOutcome::Created);
        assert_eq!(plan.content, "a: 1\n");
    }

    #[test]
    fn malformed_content_is_refused_and_left_untouched() {
        let store = MemoryManifestStore::default();
        let path = Path::new("broken.yml");
        for content in ["a: [1, 2\n", "- a\n- b\n", "a: 1\n---\nb: 2\n"] {
            store.insert(path, content);
            let err = merge(&store, path, doc("a: 1\n")).unwrap_err();
            assert!(matches!(err, AppError::MalformedExistingManifest { .. }), "{content}");
            assert_eq!(store.get(path).as_deref(), Some(content));
        }
        assert_eq!(store.writes(), 0);
    }
}
