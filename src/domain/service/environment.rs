/// A shared env variable or shared secret.
///
/// Shared entries are published into a ConfigMap (env variables) or a Secret
/// (secrets) owned by `container_id`, and referenced from the service's
/// container through `valueFrom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedEntry {
    pub key: String,
    pub value: String,
    pub comment: Option<String>,
    /// Owning container; `None` means the service's own container.
    pub container_id: Option<String>,
}

impl SharedEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), comment: None, container_id: None }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    /// Owning container, falling back to `default_container`.
    pub fn owner<'a>(&'a self, default_container: &'a str) -> &'a str {
        match self.container_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => default_container,
        }
    }
}

/// Plain env variable set directly on the service's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEnvVariable {
    pub key: String,
    pub value: String,
    pub comment: Option<String>,
}
