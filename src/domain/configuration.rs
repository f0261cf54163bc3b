//! `kubescribe.toml` configuration model.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::cluster::ClusterParameters;
use crate::domain::validation::validate_domain_name;

/// File name looked up at the project root when no explicit path is given.
pub const CONFIG_FILE: &str = "kubescribe.toml";

/// Configuration loaded from `kubescribe.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KubescribeConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
}

impl KubescribeConfig {
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        let config: KubescribeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.output.validate()?;
        self.cluster.validate()?;
        Ok(())
    }

    pub fn parameters(&self) -> ClusterParameters {
        ClusterParameters {
            use_node_port: self.cluster.use_node_port,
            base_domain: self.cluster.base_domain.clone(),
            ingress_class: self.cluster.ingress_class.clone(),
            cert_manager: self.cluster.cert_manager,
            cluster_issuer: self.cluster.cluster_issuer.clone(),
        }
    }
}

/// Where manifests are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory, relative to the project root, holding generated manifests.
    #[serde(default = "default_manifests_dir")]
    pub manifests_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { manifests_dir: default_manifests_dir() }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.manifests_dir.trim().is_empty() {
            return Err(AppError::config_error("output.manifests_dir must not be empty"));
        }
        Ok(())
    }
}

fn default_manifests_dir() -> String {
    "kubernetes".to_string()
}

/// Cluster-wide parameters of the target environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// Suffix appended to virtual host prefixes, usually starting with `.`.
    #[serde(default)]
    pub base_domain: String,
    #[serde(default)]
    pub use_node_port: bool,
    #[serde(default = "default_ingress_class")]
    pub ingress_class: String,
    #[serde(default)]
    pub cert_manager: bool,
    #[serde(default = "default_cluster_issuer")]
    pub cluster_issuer: String,
    /// Environment type of this cluster; services targeting other
    /// environments are skipped.
    #[serde(default)]
    pub env_type: Option<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            base_domain: String::new(),
            use_node_port: false,
            ingress_class: default_ingress_class(),
            cert_manager: false,
            cluster_issuer: default_cluster_issuer(),
            env_type: None,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let suffix = self.base_domain.trim_start_matches('.');
        if !suffix.is_empty() && !validate_domain_name(&format!("host.{suffix}")) {
            return Err(AppError::config_error(format!(
                "cluster.base_domain '{}' is not a domain suffix",
                self.base_domain
            )));
        }
        if self.ingress_class.trim().is_empty() {
            return Err(AppError::config_error("cluster.ingress_class must not be empty"));
        }
        if self.cert_manager && self.cluster_issuer.trim().is_empty() {
            return Err(AppError::config_error(
                "cluster.cluster_issuer is required when cert_manager is enabled",
            ));
        }
        Ok(())
    }
}

fn default_ingress_class() -> String {
    "nginx".to_string()
}

fn default_cluster_issuer() -> String {
    "letsencrypt-prod".to_string()
}
