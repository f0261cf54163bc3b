//! Test doubles and fixtures shared by unit tests.

pub mod fixtures;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::{ManifestStore, Prompter, Question};

/// In-memory manifest store recording how many writes it received.
#[derive(Debug, Default)]
pub struct MemoryManifestStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryManifestStore {
    /// Seed a file without counting it as a write.
    pub fn insert(&self, path: impl AsRef<Path>, content: &str) {
        self.files.borrow_mut().insert(path.as_ref().to_path_buf(), content.to_string());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl ManifestStore for MemoryManifestStore {
    fn read(&self, path: &Path) -> Result<Option<String>, AppError> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), AppError> {
        if self.fail_writes.get() {
            return Err(AppError::Io(std::io::Error::other("write refused")));
        }
        self.files.borrow_mut().insert(path.to_path_buf(), content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Prompter answering from a script, keyed by field name.
///
/// Fields without a scripted answer fall back to the question default, and
/// fail as unresolved when there is none.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<BTreeMap<String, VecDeque<String>>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<'a>(answers: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let prompter = Self::default();
        for (field, answer) in answers {
            prompter
                .answers
                .borrow_mut()
                .entry(field.to_string())
                .or_default()
                .push_back(answer.to_string());
        }
        prompter
    }

    /// Fields asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &Question) -> Result<String, AppError> {
        self.asked.borrow_mut().push(question.field.clone());
        let scripted =
            self.answers.borrow_mut().get_mut(&question.field).and_then(VecDeque::pop_front);
        let answer = scripted
            .or_else(|| question.default.clone())
            .ok_or_else(|| AppError::unresolved(question.field.clone()))?;
        if !question.accepts(&answer) {
            return Err(AppError::validation(&question.field, &answer, question.expected));
        }
        Ok(answer)
    }
}
