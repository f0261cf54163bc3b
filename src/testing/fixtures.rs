use crate::domain::quantity::{CpuQuantity, MemoryQuantity};
use crate::domain::service::{Service, VirtualHost};

pub fn memory(text: &str) -> MemoryQuantity {
    MemoryQuantity::parse("memory", text).unwrap()
}

pub fn cpu(text: &str) -> CpuQuantity {
    CpuQuantity::parse("cpu", text).unwrap()
}

/// Fully resolved `web` service exposed at `web.example.com:8080`.
pub fn web_service() -> Service {
    let mut service = Service::new("web");
    service.set_request_memory(memory("128Mi"));
    service.set_request_cpu(cpu("0.1"));
    service.set_limit_memory(memory("256Mi"));
    service.set_limit_cpu(cpu("0.5"));
    service.add_virtual_host(VirtualHost::new("web.example.com", 8080));
    service
}
