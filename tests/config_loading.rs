use std::io::Write;

use dialograph_core::config::AppConfig;
use dialograph_core::DialographError;

#[test]
fn test_load_full_config_from_file() {
    let toml_content = r#"
[gateway]
bind = "0.0.0.0:9999"
token = "test-token"

[storage]
path = "/tmp/dialograph-test/designer.db"

[graph]
max_nodes = 2000
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.gateway.bind, "0.0.0.0:9999");
    assert_eq!(config.gateway.token.as_deref(), Some("test-token"));
    assert_eq!(config.storage.path, "/tmp/dialograph-test/designer.db");
    assert_eq!(config.graph.max_nodes, 2000);
    assert_eq!(config.graph.node_limit(), Some(2000));
}

#[test]
fn test_env_var_expansion_in_config() {
    std::env::set_var("DIALOGRAPH_TEST_GW_TOKEN", "expanded-token-value");

    let toml_content = r#"
[gateway]
token = "${DIALOGRAPH_TEST_GW_TOKEN}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    assert_eq!(
        config.gateway.token.as_deref(),
        Some("expanded-token-value")
    );

    std::env::remove_var("DIALOGRAPH_TEST_GW_TOKEN");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(b"").expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.gateway.bind, "127.0.0.1:8484");
    assert!(config.gateway.token.is_none());
    assert_eq!(config.storage.path, "dialograph.db");
    assert!(config.graph.node_limit().is_none());
}

#[test]
fn test_missing_config_file_is_reported() {
    let err = AppConfig::load(std::path::Path::new("/nonexistent/dialograph.toml")).unwrap_err();
    assert!(matches!(err, DialographError::ConfigNotFound(_)));
}
