//! Resolution of fields the payload left open.
//!
//! Everything the synthesizers require is settled here, before any manifest
//! is built: resource quantities, virtual host names and storage requests.

use tracing::debug;

use crate::domain::AppError;
use crate::domain::cluster::ClusterParameters;
use crate::domain::quantity::{CpuQuantity, MemoryQuantity, StorageQuantity};
use crate::domain::service::Service;
use crate::domain::validation::{
    validate_byte_quantity, validate_cpu_quantity, validate_domain_name,
};
use crate::ports::{Prompter, Question};

const REQUEST_MEMORY_HELP: &str = "Amount of guaranteed memory (in bytes). A Container can exceed \
    its memory request if the Node has memory available.";
const REQUEST_CPU_HELP: &str = "Amount of guaranteed cpu units (fractional values are allowed \
    e.g. 0.1 cpu). A Container can exceed its cpu request if the Node has available cpus.";
const LIMIT_MEMORY_HELP: &str = "Amount of memory (in bytes) that a Container is not allowed to \
    exceed. If a Container allocates more memory than its limit, the Container becomes a \
    candidate for termination.";
const LIMIT_CPU_HELP: &str = "Max cpu units (fractional values are allowed e.g. 0.1 cpu) that a \
    Container is allowed to use. The limit is guaranteed by throttling.";
const HOST_EXPECTED: &str = "a fully qualified domain name (e.g. app.example.com)";
const STORAGE_HELP: &str = "Amount of guaranteed storage in bytes (e.g. 8G, 0.5Ti).";

/// Resolve every open field of `service`, asking `prompter` when needed.
pub fn resolve_service<P: Prompter>(
    service: &mut Service,
    cluster: &ClusterParameters,
    prompter: &P,
) -> Result<(), AppError> {
    resolve_resources(service, prompter)?;
    resolve_virtual_hosts(service, cluster, prompter)?;
    resolve_storage(service, prompter)?;
    Ok(())
}

fn resolve_resources<P: Prompter>(service: &mut Service, prompter: &P) -> Result<(), AppError> {
    let name = service.name().to_string();
    if service.resources().request_memory.is_none() {
        let question = memory_question("requestMemory", format!("Memory request for {name}"))
            .with_help(REQUEST_MEMORY_HELP);
        let answer = prompter.ask(&question)?;
        service.set_request_memory(MemoryQuantity::parse("requestMemory", &answer)?);
    }
    if service.resources().request_cpu.is_none() {
        let question = cpu_question("requestCpu", format!("CPU request for {name}"))
            .with_help(REQUEST_CPU_HELP);
        let answer = prompter.ask(&question)?;
        service.set_request_cpu(CpuQuantity::parse("requestCpu", &answer)?);
    }
    if service.resources().limit_memory.is_none() {
        let question = memory_question("limitMemory", format!("Memory limit for {name}"))
            .with_help(LIMIT_MEMORY_HELP);
        let answer = prompter.ask(&question)?;
        service.set_limit_memory(MemoryQuantity::parse("limitMemory", &answer)?);
    }
    if service.resources().limit_cpu.is_none() {
        let question =
            cpu_question("limitCpu", format!("CPU limit for {name}")).with_help(LIMIT_CPU_HELP);
        let answer = prompter.ask(&question)?;
        service.set_limit_cpu(CpuQuantity::parse("limitCpu", &answer)?);
    }
    Ok(())
}

fn memory_question(field: &str, prompt: String) -> Question {
    Question::new(field, prompt, validate_byte_quantity, MemoryQuantity::EXPECTED)
}

fn cpu_question(field: &str, prompt: String) -> Question {
    Question::new(field, prompt, validate_cpu_quantity, CpuQuantity::EXPECTED)
}

fn resolve_virtual_hosts<P: Prompter>(
    service: &mut Service,
    cluster: &ClusterParameters,
    prompter: &P,
) -> Result<(), AppError> {
    let name = service.name().to_string();
    for (index, vhost) in service.virtual_hosts_mut().iter_mut().enumerate() {
        let field = format!("virtualHosts[{index}].host");
        let explicit = vhost.host.as_deref().is_some_and(|host| !host.is_empty());
        if !explicit && vhost.host_prefix.is_some() && cluster.base_domain.is_empty() {
            return Err(AppError::unresolved("cluster.base_domain"));
        }

        let host = match vhost.resolve_host(&cluster.base_domain) {
            Some(host) => host,
            None => {
                let mut question = Question::new(
                    field.clone(),
                    format!("Domain name of {name} (port {})", vhost.port),
                    validate_domain_name,
                    HOST_EXPECTED,
                );
                if !cluster.base_domain.is_empty() {
                    question = question.with_default(format!("{name}{}", cluster.base_domain));
                }
                prompter.ask(&question)?
            }
        };
        if !validate_domain_name(&host) {
            return Err(AppError::validation(&field, &host, HOST_EXPECTED));
        }
        debug!(service = %name, host = %host, "Resolved virtual host");
        vhost.host = Some(host);
    }
    Ok(())
}

fn resolve_storage<P: Prompter>(service: &mut Service, prompter: &P) -> Result<(), AppError> {
    let name = service.name().to_string();
    for volume in service.named_volumes_mut() {
        if volume.request_storage.is_some() {
            continue;
        }
        let field = volume.storage_field();
        let question = Question::new(
            field.clone(),
            format!("Storage request for volume {} of {name}", volume.source),
            validate_byte_quantity,
            StorageQuantity::EXPECTED,
        )
        .with_help(STORAGE_HELP);
        let answer = prompter.ask(&question)?;
        volume.request_storage = Some(StorageQuantity::parse(&field, &answer)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::{NamedVolume, VirtualHost, Volume};
    use crate::testing::ScriptedPrompter;

    fn cluster(base_domain: &str) -> ClusterParameters {
        ClusterParameters { base_domain: base_domain.to_string(), ..ClusterParameters::default() }
    }

    fn unnamed_host(port: u16) -> VirtualHost {
        VirtualHost { host: None, host_prefix: None, port, comment: None }
    }

    #[test]
    fn resources_are_asked_in_order() {
        let mut service = Service::new("web");
        let prompter = ScriptedPrompter::new([
            ("requestMemory", "128Mi"),
            ("requestCpu", "0.1"),
            ("limitMemory", "256Mi"),
            ("limitCpu", "0.5"),
        ]);
        resolve_service(&mut service, &cluster(""), &prompter).unwrap();

        assert_eq!(
            prompter.asked(),
            vec!["requestMemory", "requestCpu", "limitMemory", "limitCpu"]
        );
        assert!(service.resources().unresolved_fields().is_empty());
        assert_eq!(service.resources().limit_cpu.as_ref().unwrap().as_str(), "0.5");
    }

    #[test]
    fn resolved_fields_are_not_asked_again() {
        let mut service = crate::testing::fixtures::web_service();
        let prompter = ScriptedPrompter::default();
        resolve_service(&mut service, &cluster(".example.org"), &prompter).unwrap();
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn host_prefix_is_joined_without_prompting() {
        let mut service = crate::testing::fixtures::web_service();
        service.add_virtual_host(VirtualHost {
            host: None,
            host_prefix: Some("admin".to_string()),
            port: 9000,
            comment: None,
        });
        let prompter = ScriptedPrompter::default();
        resolve_service(&mut service, &cluster(".example.org"), &prompter).unwrap();
        assert_eq!(service.virtual_hosts()[1].host.as_deref(), Some("admin.example.org"));
    }

    #[test]
    fn missing_host_defaults_to_service_name_on_base_domain() {
        let mut service = crate::testing::fixtures::web_service();
        service.add_virtual_host(unnamed_host(81));
        let prompter = ScriptedPrompter::default();
        resolve_service(&mut service, &cluster(".example.org"), &prompter).unwrap();

        assert_eq!(prompter.asked(), vec!["virtualHosts[1].host"]);
        assert_eq!(service.virtual_hosts()[1].host.as_deref(), Some("web.example.org"));
    }

    #[test]
    fn missing_host_without_base_domain_stays_unresolved() {
        let mut service = crate::testing::fixtures::web_service();
        service.add_virtual_host(unnamed_host(81));
        let err = resolve_service(&mut service, &cluster(""), &ScriptedPrompter::default())
            .unwrap_err();
        match err {
            AppError::PreconditionUnresolved { field } => assert_eq!(field, "virtualHosts[1].host"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn host_prefix_requires_a_base_domain() {
        let mut service = crate::testing::fixtures::web_service();
        service.add_virtual_host(VirtualHost {
            host: None,
            host_prefix: Some("shop".to_string()),
            port: 9000,
            comment: None,
        });
        let prompter = ScriptedPrompter::default();
        let err = resolve_service(&mut service, &cluster(""), &prompter).unwrap_err();
        match err {
            AppError::PreconditionUnresolved { field } => assert_eq!(field, "cluster.base_domain"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn explicit_host_must_be_a_domain_name() {
        let mut service = crate::testing::fixtures::web_service();
        service.virtual_hosts_mut()[0].host = Some("web_app".to_string());
        let prompter = ScriptedPrompter::default();
        let err = resolve_service(&mut service, &cluster(".example.org"), &prompter).unwrap_err();
        assert!(
            matches!(err, AppError::Validation { ref field, .. } if field == "virtualHosts[0].host")
        );
    }

    #[test]
    fn storage_is_asked_per_named_volume() {
        let mut service = crate::testing::fixtures::web_service();
        service.add_volume(Volume::Named(NamedVolume::new("uploads", "/srv/uploads")));
        let prompter = ScriptedPrompter::new([("volumes[uploads].requestStorage", "8G")]);
        resolve_service(&mut service, &cluster(""), &prompter).unwrap();

        let volume = service.named_volumes().next().unwrap();
        assert_eq!(volume.request_storage.as_ref().unwrap().as_str(), "8G");
    }

    #[test]
    fn invalid_answer_is_rejected() {
        let mut service = Service::new("web");
        let prompter = ScriptedPrompter::new([("requestMemory", "plenty")]);
        let err = resolve_service(&mut service, &cluster(""), &prompter).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "requestMemory"));
    }
}
