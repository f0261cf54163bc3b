//! Shared testing utilities for kubescribe CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fully resolved `web` service exposed at `web.example.com`.
#[allow(dead_code)]
pub const WEB_PAYLOAD: &str = r#"{
    "serviceName": "web",
    "image": "nginx:1.27",
    "virtualHosts": [{"host": "web.example.com", "port": 8080}],
    "requestMemory": "128Mi",
    "requestCpu": "0.1",
    "limitMemory": "256Mi",
    "limitCpu": "0.5"
}"#;

/// Isolated project directory for CLI and library exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Project root used as the working directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `kubescribe` binary in the project root.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("kubescribe").expect("Failed to locate kubescribe binary");
        cmd.current_dir(self.root());
        cmd
    }

    /// Write a file relative to the project root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative))
            .unwrap_or_else(|err| panic!("Failed to read {relative}: {err}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }
}
