use lifecycle_roadmap::config::{
    discover_config_file, generate_example_config, generate_json_schema, load_config_file, AppConfig,
    Validatable,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_yaml_file_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".roadmap.yaml");
    fs::write(
        &path,
        "rbac:\n  hostname: rbac-service\n  port: 9000\nstatus:\n  app_stream_threshold_months: 6\n",
    )
    .unwrap();

    let config = load_config_file(&path).unwrap();
    assert_eq!(config.rbac_url(), "http://rbac-service:9000");
    assert_eq!(config.status.app_stream_threshold_months, 6);
    assert_eq!(config.status.rhel_threshold_months, 6);
    assert!(!config.dev);
    assert!(config.is_valid());
}

#[test]
fn test_explicit_path_discovered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    fs::write(&path, "dev: true\n").unwrap();
    assert_eq!(discover_config_file(Some(&path)), Some(path.clone()));
    assert!(load_config_file(&path).unwrap().dev);
}

#[test]
fn test_cli_overrides_win() {
    let mut config = AppConfig::builder().rbac_hostname("from-file").rbac_port(9000).build();
    let cli = AppConfig::builder().rbac_hostname("from-cli").dev(true).build();
    config.merge(&cli);
    assert_eq!(config.rbac.hostname, "from-cli");
    assert_eq!(config.rbac.port, 9000);
    assert!(config.dev);
}

#[test]
fn test_validation_reports_every_field() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::builder()
        .hosts_file(Some(dir.path().join("missing.jsonl")))
        .rbac_hostname("http://rbac")
        .rbac_port(0)
        .rhel_threshold_months(500)
        .build();

    let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec![
            "inventory.hosts_file",
            "rbac.hostname",
            "rbac.port",
            "status.rhel_threshold_months",
        ]
    );
}

#[test]
fn test_example_and_schema() {
    let example = generate_example_config();
    let body: String = example.lines().filter(|line| !line.starts_with('#')).collect::<Vec<_>>().join("\n");
    let parsed: AppConfig = serde_yaml::from_str(&body).unwrap();
    assert_eq!(parsed, AppConfig::default());

    let schema: serde_json::Value = serde_json::from_str(&generate_json_schema().unwrap()).unwrap();
    assert!(schema["properties"]["rbac"].is_object());
    assert!(schema["properties"]["status"].is_object());
}
