use std::io;

use thiserror::Error;

/// Library-wide error type for kubescribe operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A field required at synthesis time has not been resolved yet.
    #[error("Required field '{field}' is not resolved")]
    PreconditionUnresolved { field: String },

    /// A resolved field does not match its expected format.
    #[error("Invalid value '{value}' for '{field}': expected {expected}")]
    Validation { field: String, value: String, expected: String },

    /// A derived Kubernetes object name violates naming constraints.
    #[error("Invalid object name '{input}': {reason}")]
    Naming { input: String, reason: String },

    /// Existing manifest could not be parsed; the file is left untouched.
    #[error("Refusing to overwrite {path}: existing content is not a manifest ({details})")]
    MalformedExistingManifest { path: String, details: String },

    /// A manifest path escapes the store root.
    #[error("Path traversal detected: {0}")]
    PathTraversal(String),

    /// Event payload could not be decoded.
    #[error("Malformed service payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Manifest serialization failed.
    #[error("YAML serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Interactive prompt failed or was aborted.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn unresolved<S: Into<String>>(field: S) -> Self {
        AppError::PreconditionUnresolved { field: field.into() }
    }

    pub fn validation(field: &str, value: &str, expected: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::PreconditionUnresolved { .. }
            | AppError::Validation { .. }
            | AppError::Naming { .. }
            | AppError::PathTraversal(_)
            | AppError::Payload(_)
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::MalformedExistingManifest { .. } | AppError::Serialize(_) => {
                io::ErrorKind::InvalidData
            }
            AppError::Prompt(_) => io::ErrorKind::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_message_names_field() {
        let err = AppError::unresolved("limitCpu");
        assert_eq!(err.to_string(), "Required field 'limitCpu' is not resolved");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn malformed_manifest_is_invalid_data() {
        let err = AppError::MalformedExistingManifest {
            path: "k8s/web/deployment.yml".to_string(),
            details: "bad indentation".to_string(),
        };
        assert!(err.to_string().contains("k8s/web/deployment.yml"));
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
