//! Integration tests for config and workbook loading from the demo files.

use std::path::Path;

use sheethook::config;
use sheethook::config::sources::parse_config_str;
use sheethook::config::validation::validate;
use sheethook::error::SheethookError;
use sheethook::forward::event::SubmissionEvent;
use sheethook::forward::format::format_event;
use sheethook::workbook::Workbook;

fn load_demo(name: &str) -> String {
    let path = format!("demos/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[test]
fn yaml_demo_loads_and_validates() {
    let content = load_demo("sheethook.yaml");
    let config = parse_config_str("yaml", &content, "sheethook.yaml").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.webhooks.len(), 3);
    assert_eq!(config.defaults.timeout, 10_000);
    assert_eq!(
        config.webhooks.resolve("Sign-ups"),
        Some("https://hooks.example.com/signups")
    );
}

#[test]
fn tab_lookup_is_exact() {
    let content = load_demo("sheethook.yaml");
    let config = parse_config_str("yaml", &content, "sheethook.yaml").unwrap();
    assert!(config.webhooks.resolve("orders").is_none());
    assert!(config.webhooks.resolve("Orders ").is_none());
    assert!(config.webhooks.resolve("").is_none());
}

#[cfg(feature = "json")]
#[test]
fn json_demo_loads_and_validates() {
    let content = load_demo("sheethook.json");
    let config = parse_config_str("json", &content, "sheethook.json").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.webhooks.len(), 3);
}

#[cfg(feature = "toml")]
#[test]
fn toml_demo_loads_and_validates() {
    let content = load_demo("sheethook.toml");
    let config = parse_config_str("toml", &content, "sheethook.toml").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.webhooks.len(), 3);
}

#[cfg(all(feature = "json", feature = "toml"))]
#[test]
fn all_formats_produce_equivalent_configs() {
    let yaml = parse_config_str("yaml", &load_demo("sheethook.yaml"), "yaml").unwrap();
    let json = parse_config_str("json", &load_demo("sheethook.json"), "json").unwrap();
    let toml = parse_config_str("toml", &load_demo("sheethook.toml"), "toml").unwrap();

    assert_eq!(yaml.webhooks, json.webhooks);
    assert_eq!(yaml.webhooks, toml.webhooks);
    assert_eq!(yaml.defaults.timeout, toml.defaults.timeout);
}

#[test]
fn missing_timeout_defaults_to_thirty_seconds() {
    let config = parse_config_str("yaml", "webhooks:\n  Orders: https://a.example\n", "t.yaml")
        .unwrap();
    assert_eq!(config.defaults.timeout, 30_000);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = parse_config_str("yaml", "routes: []\n", "t.yaml").unwrap_err();
    assert!(matches!(err, SheethookError::ConfigParse { .. }));
}

#[tokio::test]
async fn load_reports_source_and_version() {
    let loaded = config::load(Some(Path::new("demos/sheethook.yaml")))
        .await
        .unwrap();
    assert_eq!(loaded.source_name, "yaml");
    assert_eq!(loaded.version.short().len(), 8);
    assert_eq!(loaded.config.webhooks.len(), 3);
}

#[tokio::test]
async fn load_missing_file_fails() {
    let err = config::load(Some(Path::new("demos/nope.yaml")))
        .await
        .unwrap_err();
    assert!(matches!(err, SheethookError::ConfigFileNotFound { .. }));
}

#[tokio::test]
async fn load_rejects_unknown_extension() {
    let err = config::load(Some(Path::new("demos/workbook.ini")))
        .await
        .unwrap_err();
    assert!(matches!(err, SheethookError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn demo_workbook_loads() {
    let workbook = Workbook::load(Path::new("demos/workbook.json")).await.unwrap();
    assert_eq!(workbook.spreadsheet.id, "SSID1");

    let active = workbook.sheet(None).unwrap();
    assert_eq!(active.name, "Orders");
    assert_eq!(active.rows.len(), 3);

    let signups = workbook.sheet(Some("Sign-ups")).unwrap();
    assert!(signups.last_data_row().is_none());

    assert!(matches!(
        workbook.sheet(Some("Missing")),
        Err(SheethookError::TabNotFound { .. })
    ));
}

#[test]
fn demo_submission_formats_against_its_tab() {
    let event: SubmissionEvent = serde_json::from_str(&load_demo("submission.json")).unwrap();
    let payload = format_event(&event);

    assert_eq!(payload.get("Item"), Some(&serde_json::json!("Widget")));
    assert_eq!(payload.get("Notes"), Some(&serde_json::json!("")));
    let meta = payload.meta().unwrap();
    assert_eq!(meta.sheet_name, "Orders");
    assert_eq!(meta.spreadsheet_id, "SSID1");
    assert!(!meta.is_test_meta);
}
