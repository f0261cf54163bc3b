//! `apps/v1` Deployment running the service's container.

use serde_yaml::{Mapping, Value};

use super::{ManifestDocument, app_labels, mapping, metadata, number, object, string};
use crate::domain::AppError;
use crate::domain::grouping::group_by_container;
use crate::domain::naming;
use crate::domain::service::{ResourceSpec, Service};

pub fn synthesize(service: &Service) -> Result<ManifestDocument, AppError> {
    let name = naming::object_name(service.name())?;
    let resources = resources(service.resources())?;

    let mut container = Mapping::new();
    container.insert(string("name"), string(&name));
    if let Some(image) = service.image() {
        container.insert(string("image"), string(image));
    }

    let ports: Vec<Value> = service
        .ports()
        .into_iter()
        .map(|port| mapping([("containerPort", number(port))]))
        .collect();
    if !ports.is_empty() {
        container.insert(string("ports"), Value::Sequence(ports));
    }

    let env = env(service)?;
    if !env.is_empty() {
        container.insert(string("env"), Value::Sequence(env));
    }

    let mut mounts = Vec::new();
    let mut volumes = Vec::new();
    for volume in service.named_volumes() {
        let volume_name = naming::object_name(&volume.source)?;
        let claim_name = naming::pvc_name(&volume.source)?;
        let mut mount = Mapping::new();
        mount.insert(string("name"), string(&volume_name));
        mount.insert(string("mountPath"), string(&volume.target));
        if volume.read_only {
            mount.insert(string("readOnly"), Value::Bool(true));
        }
        mounts.push(Value::Mapping(mount));
        volumes.push(mapping([
            ("name", string(&volume_name)),
            ("persistentVolumeClaim", mapping([("claimName", string(claim_name))])),
        ]));
    }
    if !mounts.is_empty() {
        container.insert(string("volumeMounts"), Value::Sequence(mounts));
    }
    container.insert(string("resources"), resources);

    let mut pod_spec = Mapping::new();
    pod_spec.insert(string("containers"), Value::Sequence(vec![Value::Mapping(container)]));
    if !volumes.is_empty() {
        pod_spec.insert(string("volumes"), Value::Sequence(volumes));
    }

    let spec = mapping([
        ("selector", mapping([("matchLabels", app_labels(&name))])),
        (
            "template",
            mapping([
                ("metadata", mapping([("labels", app_labels(&name))])),
                ("spec", Value::Mapping(pod_spec)),
            ]),
        ),
    ]);

    let metadata = metadata(&name, Some(app_labels(&name)), std::iter::empty())?;
    let mut root = object("apps/v1", "Deployment", metadata);
    root.insert(string("spec"), spec);
    Ok(ManifestDocument::new(root))
}

fn resources(spec: &ResourceSpec) -> Result<Value, AppError> {
    let request_memory =
        spec.request_memory.as_ref().ok_or_else(|| AppError::unresolved("requestMemory"))?;
    let request_cpu =
        spec.request_cpu.as_ref().ok_or_else(|| AppError::unresolved("requestCpu"))?;
    let limit_memory =
        spec.limit_memory.as_ref().ok_or_else(|| AppError::unresolved("limitMemory"))?;
    let limit_cpu = spec.limit_cpu.as_ref().ok_or_else(|| AppError::unresolved("limitCpu"))?;

    let pair =
        |memory: &str, cpu: &str| mapping([("memory", string(memory)), ("cpu", string(cpu))]);
    Ok(mapping([
        ("requests", pair(request_memory.as_str(), request_cpu.as_str())),
        ("limits", pair(limit_memory.as_str(), limit_cpu.as_str())),
    ]))
}

/// Container env: plain values, then ConfigMap refs, then Secret refs.
fn env(service: &Service) -> Result<Vec<Value>, AppError> {
    let mut env: Vec<Value> = service
        .container_env()
        .iter()
        .map(|var| mapping([("name", string(&var.key)), ("value", string(&var.value))]))
        .collect();

    for group in group_by_container(service.shared_env_variables(), service.name()) {
        let config_map = naming::config_map_name(group.container_id)?;
        for entry in group.entries {
            env.push(key_ref(&entry.key, "configMapKeyRef", &config_map));
        }
    }
    for group in group_by_container(service.shared_secrets(), service.name()) {
        let secret = naming::secret_name(group.container_id)?;
        for entry in group.entries {
            env.push(key_ref(&entry.key, "secretKeyRef", &secret));
        }
    }
    Ok(env)
}

fn key_ref(key: &str, ref_kind: &str, object_name: &str) -> Value {
    mapping([
        ("name", string(key)),
        (
            "valueFrom",
            mapping([(ref_kind, mapping([("name", string(object_name)), ("key", string(key))]))]),
        ),
    ])
}
