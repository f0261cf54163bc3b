use crate::domain::quantity::StorageQuantity;

/// Volume attached to a service.
///
/// Only [`Volume::Named`] maps onto Kubernetes (a PersistentVolumeClaim plus
/// a pod volume mount); bind mounts and tmpfs mounts are host-local concepts
/// and are skipped during synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Volume {
    Named(NamedVolume),
    Bind(BindVolume),
    Tmpfs(TmpfsVolume),
}

impl Volume {
    pub fn type_name(&self) -> &'static str {
        match self {
            Volume::Named(_) => "volume",
            Volume::Bind(_) => "bindVolume",
            Volume::Tmpfs(_) => "tmpfsVolume",
        }
    }

    pub fn as_named(&self) -> Option<&NamedVolume> {
        match self {
            Volume::Named(volume) => Some(volume),
            _ => None,
        }
    }

    pub fn as_named_mut(&mut self) -> Option<&mut NamedVolume> {
        match self {
            Volume::Named(volume) => Some(volume),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedVolume {
    /// Logical volume name, shared by every service mounting it.
    pub source: String,
    /// Mount path inside the container.
    pub target: String,
    pub read_only: bool,
    pub comment: Option<String>,
    /// Resolved lazily; required before PVC synthesis.
    pub request_storage: Option<StorageQuantity>,
}

impl NamedVolume {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            read_only: false,
            comment: None,
            request_storage: None,
        }
    }

    /// Field path used when reporting an unresolved storage request.
    pub fn storage_field(&self) -> String {
        format!("volumes[{}].requestStorage", self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindVolume {
    pub source: String,
    pub target: String,
    pub read_only: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmpfsVolume {
    pub target: String,
    pub comment: Option<String>,
}
