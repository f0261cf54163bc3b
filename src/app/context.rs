use crate::ports::{ManifestStore, Prompter};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: ManifestStore, P: Prompter> {
    store: S,
    prompter: P,
}

impl<S: ManifestStore, P: Prompter> AppContext<S, P> {
    pub fn new(store: S, prompter: P) -> Self {
        Self { store, prompter }
    }

    /// Get a reference to the manifest store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the prompter resolving missing fields.
    pub fn prompter(&self) -> &P {
        &self.prompter
    }
}
