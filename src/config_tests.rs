use crate::config::{LogFormat, ServiceConfig};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: [&str; 6] = [
    "SERVER_BIND_ADDRESS",
    "SERVER_PORT",
    "MODEL_PATH",
    "SCALER_PATH",
    "PREDICTION_LOG_PATH",
    "LOG_FORMAT",
];

fn clear_env() {
    for key in KEYS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_service_config_defaults() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = ServiceConfig::from_env().unwrap();
    assert_eq!(config.http.bind_address, "0.0.0.0");
    assert_eq!(config.http.port, 5000);
    assert_eq!(
        config.artifacts.model_path,
        PathBuf::from("heart_disease_model.json")
    );
    assert_eq!(config.artifacts.scaler_path, PathBuf::from("scaler.json"));
    assert_eq!(
        config.artifacts.prediction_log_path,
        PathBuf::from("prediction_logs.log")
    );
    assert_eq!(config.observability.log_format, LogFormat::Pretty);
    assert!(config.observability.fallback_warning().is_none());
}

#[test]
fn test_service_config_overrides() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe {
        env::set_var("SERVER_BIND_ADDRESS", "127.0.0.1");
        env::set_var("SERVER_PORT", "8080");
        env::set_var("MODEL_PATH", "/models/model.json");
        env::set_var("SCALER_PATH", "/models/scaler.json");
        env::set_var("PREDICTION_LOG_PATH", "/var/log/predictions.log");
        env::set_var("LOG_FORMAT", "json");
    }

    let config = ServiceConfig::from_env().unwrap();
    assert_eq!(config.http.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    assert_eq!(config.artifacts.model_path, PathBuf::from("/models/model.json"));
    assert_eq!(config.artifacts.scaler_path, PathBuf::from("/models/scaler.json"));
    assert_eq!(
        config.artifacts.prediction_log_path,
        PathBuf::from("/var/log/predictions.log")
    );
    assert_eq!(config.observability.log_format, LogFormat::Json);

    clear_env();
}

#[test]
fn test_invalid_port_is_an_error() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe { env::set_var("SERVER_PORT", "not-a-port") };

    let err = ServiceConfig::from_env().unwrap_err();
    assert!(format!("{err:#}").contains("SERVER_PORT"));

    clear_env();
}

#[test]
fn test_unknown_log_format_falls_back_to_pretty() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe { env::set_var("LOG_FORMAT", "xml") };

    let config = ServiceConfig::from_env().unwrap();
    assert_eq!(config.observability.log_format, LogFormat::Pretty);
    assert_eq!(
        config.observability.rejected_log_format.as_deref(),
        Some("xml")
    );
    assert!(config.observability.fallback_warning().is_some());

    clear_env();
}
