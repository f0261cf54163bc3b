/// Public hostname routed to one port of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualHost {
    /// Explicit host; takes precedence over `host_prefix`.
    pub host: Option<String>,
    /// Prefix concatenated with the cluster base domain.
    pub host_prefix: Option<String>,
    pub port: u16,
    pub comment: Option<String>,
}

impl VirtualHost {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: Some(host.into()), host_prefix: None, port, comment: None }
    }

    /// Resolve the host without asking anyone.
    ///
    /// Returns the explicit host, or `host_prefix + base_domain`, or `None`
    /// when the host has to be asked for.
    pub fn resolve_host(&self, base_domain: &str) -> Option<String> {
        if let Some(host) = self.host.as_deref().filter(|host| !host.is_empty()) {
            return Some(host.to_string());
        }
        self.host_prefix.as_deref().map(|prefix| format!("{prefix}{base_domain}"))
    }
}
