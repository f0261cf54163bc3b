mod manifest_store;
mod prompter;

pub use manifest_store::ManifestStore;
pub use prompter::{Prompter, Question};
