//! kubescribe: synthesize Kubernetes manifests from service descriptions and
//! merge them into existing YAML without losing hand-written content.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ApplyOptions, ApplyOutcome, ApplySettings, MergeOutcome, MergePlan, WrittenManifest, apply,
    apply_at, merge_file, merge_file_at,
};
pub use domain::AppError;
