//! `networking.k8s.io/v1` Ingress routing virtual hosts to the service.

use serde_yaml::{Mapping, Value};

use super::{ManifestDocument, mapping, metadata, number, object, string};
use crate::domain::AppError;
use crate::domain::cluster::IngressOptions;
use crate::domain::naming;
use crate::domain::service::Service;

const CLUSTER_ISSUER_ANNOTATION: &str = "cert-manager.io/cluster-issuer";

pub fn synthesize(
    service: &Service,
    options: IngressOptions<'_>,
) -> Result<ManifestDocument, AppError> {
    let name = naming::object_name(service.name())?;
    if service.virtual_hosts().is_empty() {
        return Err(AppError::unresolved("virtualHosts"));
    }

    let mut hosts = Vec::with_capacity(service.virtual_hosts().len());
    for (index, vhost) in service.virtual_hosts().iter().enumerate() {
        let host = vhost
            .host
            .as_deref()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| AppError::unresolved(format!("virtualHosts[{index}].host")))?;
        hosts.push((host, vhost));
    }

    let rules: Vec<Value> = hosts
        .iter()
        .map(|(host, vhost)| {
            let backend = mapping([(
                "service",
                mapping([
                    ("name", string(&name)),
                    ("port", mapping([("number", number(vhost.port))])),
                ]),
            )]);
            let path = mapping([
                ("path", string("/")),
                ("pathType", string("Prefix")),
                ("backend", backend),
            ]);
            mapping([
                ("host", string(*host)),
                ("http", mapping([("paths", Value::Sequence(vec![path]))])),
            ])
        })
        .collect();

    let comments = hosts.iter().map(|(host, vhost)| (*host, vhost.comment.as_deref()));
    let mut metadata = metadata(&name, None, comments)?;

    let mut spec = Mapping::new();
    spec.insert(string("ingressClassName"), string(options.ingress_class));
    if let Some(issuer) = options.cert_manager {
        if let Value::Mapping(metadata) = &mut metadata {
            let annotations = metadata
                .entry(string("annotations"))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if let Value::Mapping(annotations) = annotations {
                annotations.insert(string(CLUSTER_ISSUER_ANNOTATION), string(issuer));
            }
        }
        let mut tls_hosts: Vec<Value> = Vec::with_capacity(hosts.len());
        for (host, _) in &hosts {
            let host = string(*host);
            if !tls_hosts.contains(&host) {
                tls_hosts.push(host);
            }
        }
        let tls = mapping([
            ("hosts", Value::Sequence(tls_hosts)),
            ("secretName", string(naming::tls_secret_name(&name)?)),
        ]);
        spec.insert(string("tls"), Value::Sequence(vec![tls]));
    }
    spec.insert(string("rules"), Value::Sequence(rules));

    let mut root = object("networking.k8s.io/v1", "Ingress", metadata);
    root.insert(string("spec"), Value::Mapping(spec));
    Ok(ManifestDocument::new(root))
}
