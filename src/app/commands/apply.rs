//! Apply a service description: synthesize its manifests and merge them
//! into the manifests directory.
//!
//! Every manifest is synthesized and every merge is planned before the
//! first file is written, so a failure leaves the directory untouched.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::app::AppContext;
use crate::app::resolve::resolve_service;
use crate::domain::manifest::{
    ManifestDocument, config_map, deployment, ingress, pvc, secret, service as k8s_service,
};
use crate::domain::service::{Service, Volume};
use crate::domain::{AppError, ClusterParameters, naming};
use crate::ports::{ManifestStore, Prompter};
use crate::services::manifest_merger::{self, MergeOutcome};

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Directory holding the manifests, relative to the store root.
    pub manifests_dir: PathBuf,
    pub cluster: ClusterParameters,
    /// Environment type of the target cluster; `None` accepts every service.
    pub env_type: Option<String>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            manifests_dir: PathBuf::from("kubernetes"),
            cluster: ClusterParameters::default(),
            env_type: None,
        }
    }
}

/// One manifest touched by an apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenManifest {
    pub kind: &'static str,
    pub path: PathBuf,
    pub outcome: MergeOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The service does not target the configured environment type.
    Skipped { service: String, env_type: String },
    Applied { service: String, manifests: Vec<WrittenManifest> },
}

impl ApplyOutcome {
    pub fn service(&self) -> &str {
        match self {
            ApplyOutcome::Skipped { service, .. } | ApplyOutcome::Applied { service, .. } => {
                service
            }
        }
    }

    pub fn manifests(&self) -> &[WrittenManifest] {
        match self {
            ApplyOutcome::Skipped { .. } => &[],
            ApplyOutcome::Applied { manifests, .. } => manifests,
        }
    }
}

pub fn execute<S: ManifestStore, P: Prompter>(
    ctx: &AppContext<S, P>,
    mut service: Service,
    options: &ApplyOptions,
) -> Result<ApplyOutcome, AppError> {
    match options.env_type.as_deref() {
        Some(env_type) if !service.is_for_env_type(Some(env_type)) => {
            info!(service = service.name(), env_type, "Service does not target this environment");
            return Ok(ApplyOutcome::Skipped {
                service: service.name().to_string(),
                env_type: env_type.to_string(),
            });
        }
        _ => {}
    }

    let service_dir = options.manifests_dir.join(naming::object_name(service.name())?);
    resolve_service(&mut service, &options.cluster, ctx.prompter())?;
    let documents = synthesize(&service, &options.cluster, &options.manifests_dir, &service_dir)?;

    let mut plans = Vec::with_capacity(documents.len());
    for (kind, path, document) in documents {
        plans.push((kind, manifest_merger::plan(ctx.store(), &path, document)?));
    }

    let mut manifests = Vec::with_capacity(plans.len());
    for (kind, plan) in plans {
        manifest_merger::commit(ctx.store(), &plan)?;
        manifests.push(WrittenManifest { kind, path: plan.path, outcome: plan.outcome });
    }

    info!(service = service.name(), files = manifests.len(), "Applied service");
    Ok(ApplyOutcome::Applied { service: service.name().to_string(), manifests })
}

type Synthesized = (&'static str, PathBuf, ManifestDocument);

fn synthesize(
    service: &Service,
    cluster: &ClusterParameters,
    manifests_dir: &Path,
    service_dir: &Path,
) -> Result<Vec<Synthesized>, AppError> {
    let mut documents = vec![
        ("Deployment", service_dir.join("deployment.yml"), deployment::synthesize(service)?),
        (
            "Service",
            service_dir.join("service.yml"),
            k8s_service::synthesize(service, cluster.use_node_port)?,
        ),
    ];

    for (name, document) in secret::synthesize_all(service)? {
        documents.push(("Secret", manifests_dir.join(format!("{name}.yml")), document));
    }
    for (name, document) in config_map::synthesize_all(service)? {
        documents.push(("ConfigMap", manifests_dir.join(format!("{name}.yml")), document));
    }

    if !service.virtual_hosts().is_empty() {
        let document = ingress::synthesize(service, cluster.ingress_options())?;
        documents.push(("Ingress", service_dir.join("ingress.yml"), document));
    }

    for volume in service.volumes() {
        match volume {
            Volume::Named(volume) => {
                let name = naming::pvc_name(&volume.source)?;
                let path = manifests_dir.join(format!("{name}.yml"));
                documents.push(("PersistentVolumeClaim", path, pvc::synthesize(volume)?));
            }
            other => {
                debug!(service = service.name(), volume = other.type_name(), "Skipping volume");
            }
        }
    }
    Ok(documents)
}
