//! ConfigMap holding one container group's shared env variables.

use super::{ManifestDocument, shared_data_object};
use crate::domain::AppError;
use crate::domain::grouping::{ContainerGroup, group_by_container};
use crate::domain::naming;
use crate::domain::service::Service;

pub fn synthesize(group: &ContainerGroup<'_>) -> Result<ManifestDocument, AppError> {
    let name = naming::config_map_name(group.container_id)?;
    Ok(ManifestDocument::new(shared_data_object("ConfigMap", &name, "data", group)?))
}

/// One ConfigMap per container group, paired with its object name.
pub fn synthesize_all(service: &Service) -> Result<Vec<(String, ManifestDocument)>, AppError> {
    group_by_container(service.shared_env_variables(), service.name())
        .iter()
        .map(|group| Ok((naming::config_map_name(group.container_id)?, synthesize(group)?)))
        .collect()
}
