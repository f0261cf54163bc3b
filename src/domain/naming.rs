//! Deterministic names for generated Kubernetes objects.
//!
//! Names are DNS labels: lowercase ASCII alphanumerics and `-`, starting and
//! ending with an alphanumeric, at most 63 characters. Inputs that would
//! produce anything else are rejected rather than rewritten.

use crate::domain::AppError;

/// Maximum length of a DNS-1123 label.
pub const MAX_NAME_LEN: usize = 63;

const SECRET_SUFFIX: &str = "-secret";
const CONFIG_MAP_SUFFIX: &str = "-configmap";
const PVC_SUFFIX: &str = "-pvc";

/// Prefix of the annotation keys carrying payload comments.
pub const COMMENT_ANNOTATION_PREFIX: &str = "kubescribe.io/comment.";
const ANNOTATION_PREFIX: &str = "kubescribe.io/";

fn naming_error(input: &str, reason: impl Into<String>) -> AppError {
    AppError::Naming { input: input.to_string(), reason: reason.into() }
}

fn derive(input: &str, suffix: &str) -> Result<String, AppError> {
    validate_token(input)?;
    let name = format!("{input}{suffix}");
    if name.len() > MAX_NAME_LEN {
        return Err(naming_error(
            input,
            format!("derived name '{name}' exceeds {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name)
}

fn validate_token(input: &str) -> Result<(), AppError> {
    if input.is_empty() {
        return Err(naming_error(input, "must not be empty"));
    }
    let invalid =
        input.chars().find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'));
    if let Some(c) = invalid {
        return Err(naming_error(
            input,
            format!("character '{c}' is not allowed (use lowercase letters, digits and '-')"),
        ));
    }
    if input.starts_with('-') || input.ends_with('-') {
        return Err(naming_error(input, "must start and end with a letter or digit"));
    }
    Ok(())
}

/// Validate a name used verbatim (Deployment, Service, Ingress).
pub fn object_name(name: &str) -> Result<String, AppError> {
    derive(name, "")
}

/// Name of the Secret holding the shared secrets of a container.
pub fn secret_name(container_id: &str) -> Result<String, AppError> {
    derive(container_id, SECRET_SUFFIX)
}

/// Name of the ConfigMap holding the shared env variables of a container.
pub fn config_map_name(container_id: &str) -> Result<String, AppError> {
    derive(container_id, CONFIG_MAP_SUFFIX)
}

/// Name of the PersistentVolumeClaim backing a named volume.
pub fn pvc_name(volume_source: &str) -> Result<String, AppError> {
    derive(volume_source, PVC_SUFFIX)
}

/// Name of the TLS secret cert-manager fills for a service's ingress.
pub fn tls_secret_name(service_name: &str) -> Result<String, AppError> {
    derive(service_name, "-tls")
}

/// Annotation key holding the comment attached to `key`.
///
/// The part after `kubescribe.io/` must be a valid annotation name: at most
/// 63 alphanumerics, `-`, `_` or `.`, ending with an alphanumeric.
pub fn comment_annotation(key: &str) -> Result<String, AppError> {
    let annotation = format!("{COMMENT_ANNOTATION_PREFIX}{key}");
    let name = annotation.strip_prefix(ANNOTATION_PREFIX).unwrap_or(&annotation);
    if key.is_empty() {
        return Err(naming_error(key, "annotated key must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(naming_error(
            key,
            format!("annotation name '{name}' exceeds {MAX_NAME_LEN} characters"),
        ));
    }
    let invalid =
        key.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')));
    if let Some(c) = invalid {
        return Err(naming_error(key, format!("character '{c}' is not allowed in annotations")));
    }
    if !key.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(naming_error(key, "annotated key must end with a letter or digit"));
    }
    Ok(annotation)
}
