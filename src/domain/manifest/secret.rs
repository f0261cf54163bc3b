//! Opaque Secret holding one container group's shared secrets.

use super::{ManifestDocument, shared_data_object, string};
use crate::domain::AppError;
use crate::domain::grouping::{ContainerGroup, group_by_container};
use crate::domain::naming;
use crate::domain::service::Service;

/// Values are written raw under `stringData`; the API server encodes them.
pub fn synthesize(group: &ContainerGroup<'_>) -> Result<ManifestDocument, AppError> {
    let name = naming::secret_name(group.container_id)?;
    let mut root = shared_data_object("Secret", &name, "stringData", group)?;
    root.insert(string("type"), string("Opaque"));
    Ok(ManifestDocument::new(root))
}

/// One Secret per container group, paired with its object name.
pub fn synthesize_all(service: &Service) -> Result<Vec<(String, ManifestDocument)>, AppError> {
    group_by_container(service.shared_secrets(), service.name())
        .iter()
        .map(|group| Ok((naming::secret_name(group.container_id)?, synthesize(group)?)))
        .collect()
}
