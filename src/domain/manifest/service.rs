//! `v1` Service exposing the service's ports inside the cluster.

use super::{ManifestDocument, app_labels, mapping, metadata, number, object, string};
use crate::domain::AppError;
use crate::domain::naming;
use crate::domain::service::Service;
use serde_yaml::Value;

/// `use_node_port` comes from cluster configuration, not from the service.
pub fn synthesize(service: &Service, use_node_port: bool) -> Result<ManifestDocument, AppError> {
    let name = naming::object_name(service.name())?;
    let ports: Vec<Value> = service
        .ports()
        .into_iter()
        .map(|port| {
            mapping([
                ("name", string(format!("port-{port}"))),
                ("port", number(port)),
                ("targetPort", number(port)),
            ])
        })
        .collect();
    let service_type = if use_node_port { "NodePort" } else { "ClusterIP" };

    let metadata = metadata(&name, Some(app_labels(&name)), std::iter::empty())?;
    let mut root = object("v1", "Service", metadata);
    root.insert(
        string("spec"),
        mapping([
            ("type", string(service_type)),
            ("selector", app_labels(&name)),
            ("ports", Value::Sequence(ports)),
        ]),
    );
    Ok(ManifestDocument::new(root))
}
