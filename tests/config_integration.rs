use chat_widget::chat::ChatMode;
use chat_widget::config::{AppConfig, BackendKind, DEFAULT_BACKEND_URL, DEFAULT_SUMMARY_MODEL};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::time::Duration;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CHAT_WIDGET_SERVER__PORT");
        env::remove_var("CHAT_WIDGET_WIDGET__MODE");
        env::remove_var("CHAT_WIDGET_BACKEND__BASE_URL");
        env::remove_var("CHAT_WIDGET_BACKEND__TIMEOUT_SECS");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("BACKEND_URL");
        env::remove_var("CHAT_MODE");
        env::remove_var("SERVE_ECHO");
        env::remove_var("BACKEND_KIND");
        env::remove_var("LLM_API_KEY");
        env::remove_var("CHAT_WIDGET_BACKEND__KIND");
        env::remove_var("CHAT_WIDGET_SUMMARY__MODEL");
    }
}

fn load(args: &[&str]) -> AppConfig {
    let mut argv = vec!["chat-widget"];
    argv.extend_from_slice(args);
    AppConfig::load_from_args(argv).expect("Failed to load config")
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = load(&[]);
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.widget.mode, ChatMode::Networked);
    assert_eq!(config.widget.title, "Friendly Music AI");
    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    assert_eq!(config.backend.timeout(), Some(Duration::from_secs(30)));
    assert!(!config.backend.serve_echo);
    assert_eq!(config.backend.kind, BackendKind::Http);
    assert_eq!(config.session.idle_timeout(), Duration::from_secs(1800));
    assert_eq!(config.summary.model, DEFAULT_SUMMARY_MODEL);
    assert!(config.summary.api_key.is_none());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_WIDGET_SERVER__PORT", "9090");
        env::set_var("CHAT_WIDGET_WIDGET__MODE", "local_echo");
        env::set_var("CHAT_WIDGET_BACKEND__TIMEOUT_SECS", "0");
    }

    let config = load(&[]);
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.widget.mode, ChatMode::LocalEcho);
    assert_eq!(config.backend.timeout(), None);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_WIDGET_SERVER__PORT", "9090");
    }

    let config = load(&[
        "--port",
        "4040",
        "--backend-url",
        "http://127.0.0.1:9999",
        "--serve-echo",
        "true",
    ]);
    assert_eq!(config.server.port, 4040);
    assert_eq!(config.backend.base_url, "http://127.0.0.1:9999");
    assert!(config.backend.serve_echo);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    write!(
        file,
        r#"
server:
  port: 7070
widget:
  title: Test Widget
  mode: local_echo
"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let config = load(&["--config", &path]);
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.widget.title, "Test Widget");
    assert_eq!(config.widget.mode, ChatMode::LocalEcho);
    // Untouched sections keep their defaults
    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chat-widget", "--config", "/definitely/not/here.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_mode_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chat-widget", "--mode", "carrier-pigeon"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let cwd_path = "config.yaml";
    fs::write(
        cwd_path,
        r#"
server:
  port: 6060
"#,
    )
    .expect("Failed to write ./config.yaml");

    let result = AppConfig::load_from_args(["chat-widget"]);

    // Clean up before asserting so a failure does not leave the file behind
    fs::remove_file(cwd_path).unwrap();

    assert_eq!(result.expect("Failed to load config").server.port, 6060);
}

#[test]
#[serial]
fn test_questionnaire_backend_settings() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_WIDGET_SUMMARY__MODEL", "tiny-model");
        env::set_var("LLM_API_KEY", "sk-from-env");
    }

    let config = load(&["--backend-kind", "questionnaire"]);
    assert_eq!(config.backend.kind, BackendKind::Questionnaire);

    let settings = config.summary.settings();
    assert_eq!(settings.model, "tiny-model");
    assert_eq!(settings.api_key.as_deref(), Some("sk-from-env"));
    assert_eq!(settings.timeout, Some(Duration::from_secs(120)));
    assert!(!format!("{:?}", config.summary).contains("sk-from-env"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_blank_api_key_is_ignored() {
    clear_env_vars();

    let config = load(&["--llm-api-key", "  "]);
    assert_eq!(config.summary.settings().api_key, None);
}
