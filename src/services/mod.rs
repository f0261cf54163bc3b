pub mod manifest_merger;

pub use manifest_merger::{MergeOutcome, MergePlan};
