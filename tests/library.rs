mod common;

use common::{TestContext, WEB_PAYLOAD};
use kubescribe::{AppError, ApplyOutcome, ApplySettings, MergeOutcome, apply_at, merge_file_at};
use serde_yaml::Value;
use std::path::Path;

const API_PAYLOAD: &str = r#"{
    "serviceName": "api",
    "image": "acme/api:2.0",
    "internalPorts": [9000],
    "environment": {
        "API_KEY": {"value": "k-123", "type": "sharedSecret", "containerId": "api"},
        "PROXY_TOKEN": {"value": "p-456", "type": "sharedSecret", "containerId": "sidecar"},
        "LOG_LEVEL": {"value": "debug", "type": "sharedEnvVariable", "comment": "verbosity"}
    },
    "volumes": [
        {"type": "volume", "source": "api-data", "target": "/data", "requestStorage": "8G"},
        {"type": "bindVolume", "source": "./conf", "target": "/etc/api"}
    ],
    "requestMemory": "256Mi",
    "requestCpu": "250m",
    "limitMemory": "512Mi",
    "limitCpu": "1"
}"#;

fn settings() -> ApplySettings {
    ApplySettings::default()
}

fn edit_yaml(ctx: &TestContext, relative: &str, edit: impl FnOnce(&mut Value)) {
    let mut value: Value = serde_yaml::from_str(&ctx.read(relative)).unwrap();
    edit(&mut value);
    ctx.write(relative, &serde_yaml::to_string(&value).unwrap());
}

fn read_yaml(ctx: &TestContext, relative: &str) -> Value {
    serde_yaml::from_str(&ctx.read(relative)).unwrap()
}

#[test]
fn api_service_gets_one_secret_per_container() {
    let ctx = TestContext::new();
    let outcome = apply_at(ctx.root(), API_PAYLOAD, &settings()).unwrap();

    let api_secret = ctx.read("kubernetes/api-secret.yml");
    assert!(api_secret.contains("API_KEY: k-123"));
    assert!(!api_secret.contains("PROXY_TOKEN"));

    let sidecar_secret = ctx.read("kubernetes/sidecar-secret.yml");
    assert!(sidecar_secret.contains("PROXY_TOKEN: p-456"));
    assert!(!sidecar_secret.contains("API_KEY"));

    let config_map = ctx.read("kubernetes/api-configmap.yml");
    assert!(config_map.contains("LOG_LEVEL: debug"));
    assert!(config_map.contains("comment.LOG_LEVEL"));
    assert!(config_map.contains("verbosity"));

    let pvc = ctx.read("kubernetes/api-data-pvc.yml");
    assert!(pvc.contains("storage: 8G"));
    assert!(pvc.contains("ReadWriteOnce"));

    // No virtual hosts, so no ingress; the bind volume is skipped.
    assert!(!ctx.exists("kubernetes/api/ingress.yml"));
    assert_eq!(outcome.manifests().len(), 6);
}

#[test]
fn deployment_references_secrets_and_claims() {
    let ctx = TestContext::new();
    apply_at(ctx.root(), API_PAYLOAD, &settings()).unwrap();

    let deployment = ctx.read("kubernetes/api/deployment.yml");
    assert!(deployment.contains("secretKeyRef"));
    assert!(deployment.contains("name: sidecar-secret"));
    assert!(deployment.contains("configMapKeyRef"));
    assert!(deployment.contains("claimName: api-data-pvc"));
    assert!(deployment.contains("mountPath: /data"));
    assert!(deployment.contains("containerPort: 9000"));
}

#[test]
fn rerun_reports_every_manifest_unchanged() {
    let ctx = TestContext::new();
    apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    let before = ctx.read("kubernetes/web/ingress.yml");

    let outcome = apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    match &outcome {
        ApplyOutcome::Applied { manifests, .. } => {
            assert_eq!(manifests.len(), 3);
            assert!(manifests.iter().all(|m| m.outcome == MergeOutcome::Unchanged));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(ctx.read("kubernetes/web/ingress.yml"), before);
}

#[test]
fn malformed_existing_manifest_blocks_the_whole_apply() {
    let ctx = TestContext::new();
    ctx.write("kubernetes/web/service.yml", "- just\n- a list\n");

    let err = apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap_err();
    assert!(matches!(err, AppError::MalformedExistingManifest { .. }));
    assert!(!ctx.exists("kubernetes/web/deployment.yml"));
    assert_eq!(ctx.read("kubernetes/web/service.yml"), "- just\n- a list\n");
}

#[test]
fn empty_existing_file_is_overwritten() {
    let ctx = TestContext::new();
    ctx.write("kubernetes/web/service.yml", "");

    apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    assert!(ctx.read("kubernetes/web/service.yml").contains("kind: Service"));
}

#[test]
fn host_prefix_uses_configured_base_domain() {
    let ctx = TestContext::new();
    ctx.write("kubescribe.toml", "[cluster]\nbase_domain = \".apps.example.net\"\n");
    let payload = WEB_PAYLOAD.replace(r#""host": "web.example.com""#, r#""hostPrefix": "shop""#);

    apply_at(ctx.root(), &payload, &settings()).unwrap();
    assert!(ctx.read("kubernetes/web/ingress.yml").contains("host: shop.apps.example.net"));
}

#[test]
fn merge_file_keeps_unrelated_keys() {
    let ctx = TestContext::new();
    ctx.write("manifest.yml", "X: foo\nkind: Old\n");

    let plan = merge_file_at(ctx.root(), Path::new("manifest.yml"), "kind: New\n").unwrap();
    assert_eq!(plan.outcome, MergeOutcome::Updated);
    assert_eq!(ctx.read("manifest.yml"), "X: foo\nkind: New\n");
}

#[test]
fn hand_named_container_port_is_not_duplicated() {
    let ctx = TestContext::new();
    apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    edit_yaml(&ctx, "kubernetes/web/deployment.yml", |doc| {
        let port = doc["spec"]["template"]["spec"]["containers"][0]["ports"][0]
            .as_mapping_mut()
            .unwrap();
        port.insert(Value::String("name".to_string()), Value::String("http".to_string()));
    });

    apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    let doc = read_yaml(&ctx, "kubernetes/web/deployment.yml");
    let ports = doc["spec"]["template"]["spec"]["containers"][0]["ports"].as_sequence().unwrap();
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0]["containerPort"].as_u64(), Some(8080));
    assert_eq!(ports[0]["name"].as_str(), Some("http"));
    assert_eq!(ctx.read("kubernetes/web/deployment.yml").matches("containerPort: 8080").count(), 1);
}

#[test]
fn renamed_service_port_is_not_duplicated() {
    let ctx = TestContext::new();
    apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    edit_yaml(&ctx, "kubernetes/web/service.yml", |doc| {
        doc["spec"]["ports"][0]["name"] = Value::String("http".to_string());
    });

    apply_at(ctx.root(), WEB_PAYLOAD, &settings()).unwrap();
    let doc = read_yaml(&ctx, "kubernetes/web/service.yml");
    let ports = doc["spec"]["ports"].as_sequence().unwrap();
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0]["port"].as_u64(), Some(8080));
    assert_eq!(ports[0]["name"].as_str(), Some("port-8080"));
}

#[test]
fn host_prefix_without_base_domain_is_unresolved() {
    let ctx = TestContext::new();
    let payload = WEB_PAYLOAD.replace(r#""host": "web.example.com""#, r#""hostPrefix": "shop""#);

    let err = apply_at(ctx.root(), &payload, &settings()).unwrap_err();
    match err {
        AppError::PreconditionUnresolved { field } => assert_eq!(field, "cluster.base_domain"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!ctx.exists("kubernetes"));
}
