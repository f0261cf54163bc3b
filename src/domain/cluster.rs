/// Cluster-wide synthesis parameters.
///
/// These come from the process configuration and are handed to the
/// synthesizers explicitly; nothing in the domain looks them up itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterParameters {
    /// Expose services as `NodePort` instead of `ClusterIP`.
    pub use_node_port: bool,
    /// Suffix appended to virtual host prefixes (e.g. `.example.com`).
    pub base_domain: String,
    pub ingress_class: String,
    /// Request TLS certificates through cert-manager.
    pub cert_manager: bool,
    pub cluster_issuer: String,
}

impl ClusterParameters {
    pub fn ingress_options(&self) -> IngressOptions<'_> {
        IngressOptions {
            ingress_class: &self.ingress_class,
            cert_manager: self.cert_manager.then_some(self.cluster_issuer.as_str()),
        }
    }
}

impl Default for ClusterParameters {
    fn default() -> Self {
        Self {
            use_node_port: false,
            base_domain: String::new(),
            ingress_class: "nginx".to_string(),
            cert_manager: false,
            cluster_issuer: "letsencrypt-prod".to_string(),
        }
    }
}

/// Parameters of Ingress synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngressOptions<'a> {
    pub ingress_class: &'a str,
    /// Cluster issuer when cert-manager issues the TLS certificate.
    pub cert_manager: Option<&'a str>,
}
