//! Decoding of the service-changed event payload into a [`Service`].

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::quantity::{CpuQuantity, MemoryQuantity, StorageQuantity};
use crate::domain::service::{
    BindVolume, ContainerEnvVariable, NamedVolume, Service, SharedEntry, TmpfsVolume, VirtualHost,
    Volume,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServicePayload {
    service_name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    dest_env_types: Vec<String>,
    #[serde(default)]
    internal_ports: Vec<Scalar>,
    #[serde(default)]
    environment: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    volumes: Vec<VolumePayload>,
    #[serde(default)]
    virtual_hosts: Vec<VirtualHostPayload>,
    #[serde(default)]
    request_memory: Option<Scalar>,
    #[serde(default)]
    request_cpu: Option<Scalar>,
    #[serde(default)]
    limit_memory: Option<Scalar>,
    #[serde(default)]
    limit_cpu: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentPayload {
    value: Scalar,
    #[serde(rename = "type")]
    kind: EnvironmentKind,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    container_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum EnvironmentKind {
    SharedEnvVariable,
    SharedSecret,
    ContainerEnvVariable,
    ImageEnvVariable,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum VolumePayload {
    #[serde(rename = "volume", rename_all = "camelCase")]
    Named {
        source: String,
        target: String,
        #[serde(default)]
        read_only: bool,
        #[serde(default)]
        comment: Option<String>,
        #[serde(default)]
        request_storage: Option<Scalar>,
    },
    #[serde(rename_all = "camelCase")]
    BindVolume {
        source: String,
        target: String,
        #[serde(default)]
        read_only: bool,
        #[serde(default)]
        comment: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TmpfsVolume {
        #[serde(alias = "source")]
        target: String,
        #[serde(default)]
        comment: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VirtualHostPayload {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    host_prefix: Option<String>,
    port: Scalar,
    #[serde(default)]
    comment: Option<String>,
}

/// JSON value accepted where a string or a number may appear.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
            Scalar::Bool(value) => value.to_string(),
        }
    }
}

fn port(field: &str, value: Scalar) -> Result<u16, AppError> {
    let text = value.into_text();
    match text.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(AppError::validation(field, &text, "a port number between 1 and 65535")),
    }
}

/// Decode an event payload.
///
/// Unknown fields are ignored. Image env variables are baked into the image
/// and are dropped here.
pub fn decode(json: &str) -> Result<Service, AppError> {
    let payload: ServicePayload = serde_json::from_str(json)?;
    let mut service = Service::new(payload.service_name);

    if let Some(image) = payload.image.filter(|image| !image.trim().is_empty()) {
        service.set_image(image);
    }
    for env_type in payload.dest_env_types {
        service.add_dest_env_type(env_type);
    }
    for (index, value) in payload.internal_ports.into_iter().enumerate() {
        service.add_internal_port(port(&format!("internalPorts[{index}]"), value)?);
    }

    if let Some(value) = payload.request_memory {
        service.set_request_memory(MemoryQuantity::parse("requestMemory", &value.into_text())?);
    }
    if let Some(value) = payload.request_cpu {
        service.set_request_cpu(CpuQuantity::parse("requestCpu", &value.into_text())?);
    }
    if let Some(value) = payload.limit_memory {
        service.set_limit_memory(MemoryQuantity::parse("limitMemory", &value.into_text())?);
    }
    if let Some(value) = payload.limit_cpu {
        service.set_limit_cpu(CpuQuantity::parse("limitCpu", &value.into_text())?);
    }

    for (key, value) in payload.environment {
        let entry: EnvironmentPayload = serde_json::from_value(value)?;
        let value = entry.value.into_text();
        match entry.kind {
            EnvironmentKind::SharedEnvVariable | EnvironmentKind::SharedSecret => {
                let shared = SharedEntry {
                    key,
                    value,
                    comment: entry.comment,
                    container_id: entry.container_id,
                };
                if matches!(entry.kind, EnvironmentKind::SharedSecret) {
                    service.add_shared_secret(shared);
                } else {
                    service.add_shared_env_variable(shared);
                }
            }
            EnvironmentKind::ContainerEnvVariable => {
                service.add_container_env(ContainerEnvVariable {
                    key,
                    value,
                    comment: entry.comment,
                });
            }
            EnvironmentKind::ImageEnvVariable => {}
        }
    }

    for volume in payload.volumes {
        let volume = match volume {
            VolumePayload::Named { source, target, read_only, comment, request_storage } => {
                let mut named = NamedVolume::new(source, target);
                named.read_only = read_only;
                named.comment = comment;
                if let Some(storage) = request_storage {
                    let field = named.storage_field();
                    named.request_storage =
                        Some(StorageQuantity::parse(&field, &storage.into_text())?);
                }
                Volume::Named(named)
            }
            VolumePayload::BindVolume { source, target, read_only, comment } => {
                Volume::Bind(BindVolume { source, target, read_only, comment })
            }
            VolumePayload::TmpfsVolume { target, comment } => {
                Volume::Tmpfs(TmpfsVolume { target, comment })
            }
        };
        service.add_volume(volume);
    }

    for (index, vhost) in payload.virtual_hosts.into_iter().enumerate() {
        service.add_virtual_host(VirtualHost {
            host: vhost.host.filter(|host| !host.is_empty()),
            host_prefix: vhost.host_prefix,
            port: port(&format!("virtualHosts[{index}].port"), vhost.port)?,
            comment: vhost.comment,
        });
    }

    Ok(service)
}
