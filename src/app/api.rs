//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::{Path, PathBuf};

use crate::adapters::{DialoguerPrompter, FilesystemManifestStore, NonInteractivePrompter};
use crate::app::commands::{apply, merge};
use crate::app::config::load_config;
use crate::app::{AppContext, payload};
use crate::domain::Service;
use crate::ports::Prompter;

pub use crate::app::commands::apply::{ApplyOptions, ApplyOutcome, WrittenManifest};
pub use crate::domain::AppError;
pub use crate::services::{MergeOutcome, MergePlan};

/// How an apply run is configured by its caller.
#[derive(Debug, Clone, Default)]
pub struct ApplySettings {
    /// Configuration file; `kubescribe.toml` at the root when absent.
    pub config: Option<PathBuf>,
    /// Overrides `cluster.env_type` from the configuration file.
    pub env_type: Option<String>,
    /// Ask for missing fields on the terminal instead of failing.
    pub interactive: bool,
}

/// Apply a service payload to the project in the current directory.
pub fn apply(payload: &str, settings: &ApplySettings) -> Result<ApplyOutcome, AppError> {
    apply_at(std::env::current_dir()?, payload, settings)
}

/// Apply a service payload to the project at `root`.
pub fn apply_at(
    root: impl Into<PathBuf>,
    payload: &str,
    settings: &ApplySettings,
) -> Result<ApplyOutcome, AppError> {
    let root = root.into();
    let config = load_config(&root, settings.config.as_deref())?;
    let options = ApplyOptions {
        manifests_dir: PathBuf::from(&config.output.manifests_dir),
        cluster: config.parameters(),
        env_type: settings.env_type.clone().or(config.cluster.env_type),
    };
    let service = payload::decode(payload)?;
    let store = FilesystemManifestStore::new(root);

    if settings.interactive {
        run_apply(store, DialoguerPrompter, service, &options)
    } else {
        run_apply(store, NonInteractivePrompter, service, &options)
    }
}

fn run_apply<P: Prompter>(
    store: FilesystemManifestStore,
    prompter: P,
    service: Service,
    options: &ApplyOptions,
) -> Result<ApplyOutcome, AppError> {
    let ctx = AppContext::new(store, prompter);
    apply::execute(&ctx, service, options)
}

/// Merge a YAML fragment into `target`, relative to the current directory.
pub fn merge_file(target: &Path, fragment: &str) -> Result<MergePlan, AppError> {
    merge_file_at(std::env::current_dir()?, target, fragment)
}

/// Merge a YAML fragment into `target`, relative to `root`.
pub fn merge_file_at(
    root: impl Into<PathBuf>,
    target: &Path,
    fragment: &str,
) -> Result<MergePlan, AppError> {
    let store = FilesystemManifestStore::new(root);
    merge::execute(&store, target, fragment)
}
