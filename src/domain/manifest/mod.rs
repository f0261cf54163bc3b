//! Manifest documents and the synthesizers producing them.
//!
//! Every synthesizer is a pure function from the service model to a
//! [`ManifestDocument`]. Unresolved inputs fail with
//! `AppError::PreconditionUnresolved`; nothing is defaulted.

pub mod config_map;
pub mod deployment;
pub mod ingress;
pub mod pvc;
pub mod secret;
pub mod service;

use serde_yaml::{Mapping, Value};

use crate::domain::AppError;
use crate::domain::grouping::ContainerGroup;
use crate::domain::naming;

/// Label selecting the pods of a service.
pub const APP_LABEL: &str = "app";

/// A YAML manifest whose root is a mapping.
///
/// Key order is insertion order, which keeps serialized output stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestDocument(Mapping);

impl ManifestDocument {
    pub fn new(root: Mapping) -> Self {
        Self(root)
    }

    /// Wrap a parsed value; only mappings are documents.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(root) => Some(Self(root)),
            _ => None,
        }
    }

    /// Parse YAML text into a document.
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
            .ok_or_else(|| AppError::config_error("YAML document root must be a mapping"))
    }

    pub fn root(&self) -> &Mapping {
        &self.0
    }

    pub fn into_root(self) -> Mapping {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.0)
    }

    /// Look up a nested mapping value by key path.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.as_mapping()?.get(*key)?;
        }
        Some(current)
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(&self.0)?)
    }
}

pub(crate) fn string(value: impl Into<String>) -> Value {
    Value::String(value.into())
}

pub(crate) fn number(value: u16) -> Value {
    Value::Number(u64::from(value).into())
}

pub(crate) fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
    Value::Mapping(
        entries.into_iter().map(|(key, value)| (Value::String(key.into()), value)).collect(),
    )
}

/// `apiVersion` / `kind` / `metadata` header shared by every object.
pub(crate) fn object(api_version: &str, kind: &str, metadata: Value) -> Mapping {
    let mut root = Mapping::new();
    root.insert(string("apiVersion"), string(api_version));
    root.insert(string("kind"), string(kind));
    root.insert(string("metadata"), metadata);
    root
}

/// `metadata` with a name and, when any comment is present, annotations.
///
/// Comments sharing a key are joined with `; ` in the order given.
pub(crate) fn metadata<'a>(
    name: &str,
    labels: Option<Value>,
    comments: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> Result<Value, AppError> {
    let mut metadata = Mapping::new();
    metadata.insert(string("name"), string(name));
    if let Some(labels) = labels {
        metadata.insert(string("labels"), labels);
    }
    let mut annotations = Mapping::new();
    for (key, comment) in comments {
        let Some(comment) = comment else {
            continue;
        };
        let annotation = string(naming::comment_annotation(key)?);
        match annotations.get_mut(&annotation) {
            Some(Value::String(existing)) => {
                if !existing.split("; ").any(|seen| seen == comment) {
                    existing.push_str("; ");
                    existing.push_str(comment);
                }
            }
            _ => {
                annotations.insert(annotation, string(comment));
            }
        }
    }
    if !annotations.is_empty() {
        metadata.insert(string("annotations"), Value::Mapping(annotations));
    }
    Ok(Value::Mapping(metadata))
}

/// Object carrying one container group's shared entries under `data_field`.
pub(crate) fn shared_data_object(
    kind: &str,
    name: &str,
    data_field: &str,
    group: &ContainerGroup<'_>,
) -> Result<Mapping, AppError> {
    let comments =
        group.entries.iter().map(|entry| (entry.key.as_str(), entry.comment.as_deref()));
    let data =
        mapping(group.entries.iter().map(|entry| (entry.key.as_str(), string(&entry.value))));
    let mut root = object("v1", kind, metadata(name, None, comments)?);
    root.insert(string(data_field), data);
    Ok(root)
}

pub(crate) fn app_labels(service_name: &str) -> Value {
    mapping([(APP_LABEL, string(service_name))])
}
