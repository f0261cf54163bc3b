//! PersistentVolumeClaim backing a named volume.

use serde_yaml::Value;

use super::{ManifestDocument, mapping, metadata, object, string};
use crate::domain::AppError;
use crate::domain::naming;
use crate::domain::service::NamedVolume;

pub fn synthesize(volume: &NamedVolume) -> Result<ManifestDocument, AppError> {
    let name = naming::pvc_name(&volume.source)?;
    let storage = volume
        .request_storage
        .as_ref()
        .ok_or_else(|| AppError::unresolved(volume.storage_field()))?;
    let access_mode = if volume.read_only { "ReadOnlyMany" } else { "ReadWriteOnce" };

    let requests = mapping([("storage", string(storage.as_str()))]);
    let comments = [(volume.source.as_str(), volume.comment.as_deref())];
    let mut root = object("v1", "PersistentVolumeClaim", metadata(&name, None, comments)?);
    root.insert(
        string("spec"),
        mapping([
            ("accessModes", Value::Sequence(vec![string(access_mode)])),
            ("resources", mapping([("requests", requests)])),
        ]),
    );
    Ok(ManifestDocument::new(root))
}
