//! Concrete implementations of the ports.

mod manifest_filesystem;
mod prompt_dialoguer;
mod prompt_non_interactive;

pub use manifest_filesystem::FilesystemManifestStore;
pub use prompt_dialoguer::DialoguerPrompter;
pub use prompt_non_interactive::NonInteractivePrompter;
