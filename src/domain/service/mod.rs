//! Service model: one deployable unit described independently of Kubernetes.

mod environment;
mod virtual_host;
mod volume;

pub use environment::{ContainerEnvVariable, SharedEntry};
pub use virtual_host::VirtualHost;
pub use volume::{BindVolume, NamedVolume, TmpfsVolume, Volume};

use crate::domain::quantity::{CpuQuantity, MemoryQuantity};

/// Resource requests and limits; each field is optional until resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSpec {
    pub request_memory: Option<MemoryQuantity>,
    pub request_cpu: Option<CpuQuantity>,
    pub limit_memory: Option<MemoryQuantity>,
    pub limit_cpu: Option<CpuQuantity>,
}

impl ResourceSpec {
    /// Names of fields still unresolved, in the order they are asked for.
    pub fn unresolved_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.request_memory.is_none() {
            fields.push("requestMemory");
        }
        if self.request_cpu.is_none() {
            fields.push("requestCpu");
        }
        if self.limit_memory.is_none() {
            fields.push("limitMemory");
        }
        if self.limit_cpu.is_none() {
            fields.push("limitCpu");
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    name: String,
    image: Option<String>,
    dest_env_types: Vec<String>,
    resources: ResourceSpec,
    internal_ports: Vec<u16>,
    container_env: Vec<ContainerEnvVariable>,
    shared_env: Vec<SharedEntry>,
    shared_secrets: Vec<SharedEntry>,
    volumes: Vec<Volume>,
    virtual_hosts: Vec<VirtualHost>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.image = Some(image.into());
    }

    pub fn dest_env_types(&self) -> &[String] {
        &self.dest_env_types
    }

    pub fn add_dest_env_type(&mut self, env_type: impl Into<String>) {
        self.dest_env_types.push(env_type.into());
    }

    /// Whether this service targets `env_type`.
    ///
    /// A service without destination env types targets every environment,
    /// and an unconfigured env type accepts every service.
    pub fn is_for_env_type(&self, env_type: Option<&str>) -> bool {
        match env_type {
            None => true,
            Some(_) if self.dest_env_types.is_empty() => true,
            Some(env_type) => self.dest_env_types.iter().any(|t| t.eq_ignore_ascii_case(env_type)),
        }
    }

    pub fn resources(&self) -> &ResourceSpec {
        &self.resources
    }

    pub fn set_request_memory(&mut self, quantity: MemoryQuantity) {
        self.resources.request_memory = Some(quantity);
    }

    pub fn set_request_cpu(&mut self, quantity: CpuQuantity) {
        self.resources.request_cpu = Some(quantity);
    }

    pub fn set_limit_memory(&mut self, quantity: MemoryQuantity) {
        self.resources.limit_memory = Some(quantity);
    }

    pub fn set_limit_cpu(&mut self, quantity: CpuQuantity) {
        self.resources.limit_cpu = Some(quantity);
    }

    pub fn add_internal_port(&mut self, port: u16) {
        if !self.internal_ports.contains(&port) {
            self.internal_ports.push(port);
        }
    }

    /// Distinct exposed ports: internal ports first, then virtual host ports.
    pub fn ports(&self) -> Vec<u16> {
        let mut ports = self.internal_ports.clone();
        for vhost in &self.virtual_hosts {
            if !ports.contains(&vhost.port) {
                ports.push(vhost.port);
            }
        }
        ports
    }

    pub fn container_env(&self) -> &[ContainerEnvVariable] {
        &self.container_env
    }

    pub fn add_container_env(&mut self, variable: ContainerEnvVariable) {
        match self.container_env.iter_mut().find(|existing| existing.key == variable.key) {
            Some(existing) => *existing = variable,
            None => self.container_env.push(variable),
        }
    }

    pub fn shared_env_variables(&self) -> &[SharedEntry] {
        &self.shared_env
    }

    /// Add a shared env variable, replacing one with the same owner and key.
    pub fn add_shared_env_variable(&mut self, entry: SharedEntry) {
        upsert_shared(&mut self.shared_env, &self.name, entry);
    }

    pub fn shared_secrets(&self) -> &[SharedEntry] {
        &self.shared_secrets
    }

    /// Add a shared secret, replacing one with the same owner and key.
    pub fn add_shared_secret(&mut self, entry: SharedEntry) {
        upsert_shared(&mut self.shared_secrets, &self.name, entry);
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    pub fn add_volume(&mut self, volume: Volume) {
        self.volumes.push(volume);
    }

    pub fn named_volumes(&self) -> impl Iterator<Item = &NamedVolume> {
        self.volumes.iter().filter_map(Volume::as_named)
    }

    pub fn named_volumes_mut(&mut self) -> impl Iterator<Item = &mut NamedVolume> {
        self.volumes.iter_mut().filter_map(Volume::as_named_mut)
    }

    pub fn virtual_hosts(&self) -> &[VirtualHost] {
        &self.virtual_hosts
    }

    pub fn virtual_hosts_mut(&mut self) -> &mut [VirtualHost] {
        &mut self.virtual_hosts
    }

    pub fn add_virtual_host(&mut self, vhost: VirtualHost) {
        self.virtual_hosts.push(vhost);
    }
}

fn upsert_shared(entries: &mut Vec<SharedEntry>, service_name: &str, entry: SharedEntry) {
    let owner = entry.owner(service_name).to_string();
    let existing =
        entries.iter_mut().find(|e| e.key == entry.key && e.owner(service_name) == owner);
    match existing {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}
