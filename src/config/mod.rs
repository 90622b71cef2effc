//! Configuration management
//!
//! This module handles loading and parsing configuration for qrdash.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Simulated network latency
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Local key/value store configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// QR registry configuration
    #[serde(default)]
    pub qr: QrConfig,
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Simulated latency per operation, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// When false every delay is zero
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sign_up_ms")]
    pub sign_up_ms: u64,
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,
    #[serde(default = "default_logout_ms")]
    pub logout_ms: u64,
    #[serde(default)]
    pub current_session_ms: u64,
    #[serde(default = "default_create_ms")]
    pub create_ms: u64,
    #[serde(default = "default_list_ms")]
    pub list_ms: u64,
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,
    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sign_up_ms: default_sign_up_ms(),
            login_ms: default_login_ms(),
            logout_ms: default_logout_ms(),
            current_session_ms: 0,
            create_ms: default_create_ms(),
            list_ms: default_list_ms(),
            update_ms: default_update_ms(),
            delete_ms: default_delete_ms(),
        }
    }
}

impl LatencyConfig {
    /// Configuration with every delay disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Convert a millisecond setting into a delay, honoring `enabled`
    pub fn delay(&self, ms: u64) -> Duration {
        if self.enabled {
            Duration::from_millis(ms)
        } else {
            Duration::ZERO
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sign_up_ms() -> u64 {
    800
}

fn default_login_ms() -> u64 {
    800
}

fn default_logout_ms() -> u64 {
    300
}

fn default_create_ms() -> u64 {
    1000
}

fn default_list_ms() -> u64 {
    500
}

fn default_update_ms() -> u64 {
    600
}

fn default_delete_ms() -> u64 {
    500
}

/// Local store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store driver (memory or file)
    #[serde(default)]
    pub driver: StorageDriver,
    /// Backing file for the file driver
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Key under which the current session is persisted
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            driver: StorageDriver::default(),
            path: default_storage_path(),
            session_key: default_session_key(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/local_storage.json")
}

fn default_session_key() -> String {
    "auth_user".to_string()
}

/// Local store driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageDriver {
    /// In-process store (default)
    #[default]
    Memory,
    /// JSON file on disk
    File,
}

/// QR registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    /// External QR rendering endpoint
    #[serde(default = "default_image_service_url")]
    pub image_service_url: String,
    /// Requested image dimensions
    #[serde(default = "default_image_size")]
    pub image_size: String,
    /// Base of the redirect service; `/redirect/<id>` is appended
    #[serde(default = "default_redirect_base_url")]
    pub redirect_base_url: String,
    /// Label used when none is supplied
    #[serde(default = "default_label")]
    pub default_label: String,
    /// Start the registry with the two demo records
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            image_service_url: default_image_service_url(),
            image_size: default_image_size(),
            redirect_base_url: default_redirect_base_url(),
            default_label: default_label(),
            seed_demo_data: true,
        }
    }
}

fn default_image_service_url() -> String {
    "https://api.qrserver.com/v1/create-qr-code/".to_string()
}

fn default_image_size() -> String {
    "200x200".to_string()
}

fn default_redirect_base_url() -> String {
    "https://api-placeholder.execute-api.us-east-1.amazonaws.com/dev".to_string()
}

fn default_label() -> String {
    "Untitled QR".to_string()
}

/// Remote API settings
///
/// Nothing in the mock talks to these endpoints; they describe where a real
/// deployment would point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_pool_id")]
    pub cognito_user_pool_id: String,
    #[serde(default = "default_client_id")]
    pub cognito_client_id: String,
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            cognito_user_pool_id: default_user_pool_id(),
            cognito_client_id: default_client_id(),
            region: default_region(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_user_pool_id() -> String {
    "us-east-1_placeholder".to_string()
}

fn default_client_id() -> String {
    "placeholder-client-id".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables:
    /// - QRDASH_LATENCY_ENABLED
    /// - QRDASH_STORAGE_DRIVER
    /// - QRDASH_STORAGE_PATH
    /// - QRDASH_SEED_DEMO_DATA
    /// - QRDASH_API_BASE_URL
    /// - QRDASH_COGNITO_USER_POOL_ID
    /// - QRDASH_COGNITO_CLIENT_ID
    /// - QRDASH_AWS_REGION
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Some(enabled) = env_bool("QRDASH_LATENCY_ENABLED") {
            self.latency.enabled = enabled;
        }

        if let Ok(driver) = std::env::var("QRDASH_STORAGE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "memory" => self.storage.driver = StorageDriver::Memory,
                "file" => self.storage.driver = StorageDriver::File,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(path) = std::env::var("QRDASH_STORAGE_PATH") {
            self.storage.path = PathBuf::from(path);
        }

        if let Some(seed) = env_bool("QRDASH_SEED_DEMO_DATA") {
            self.qr.seed_demo_data = seed;
        }

        if let Ok(base_url) = std::env::var("QRDASH_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Ok(pool_id) = std::env::var("QRDASH_COGNITO_USER_POOL_ID") {
            self.api.cognito_user_pool_id = pool_id;
        }
        if let Ok(client_id) = std::env::var("QRDASH_COGNITO_CLIENT_ID") {
            self.api.cognito_client_id = client_id;
        }
        if let Ok(region) = std::env::var("QRDASH_AWS_REGION") {
            self.api.region = region;
        }
    }
}

fn env_bool(key: &str) -> Option<bool> {
    match std::env::var(key).ok()?.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_KEYS: &[&str] = &[
    "QRDASH_LATENCY_ENABLED",
    "QRDASH_STORAGE_DRIVER",
    "QRDASH_STORAGE_PATH",
    "QRDASH_SEED_DEMO_DATA",
    "QRDASH_API_BASE_URL",
    "QRDASH_COGNITO_USER_POOL_ID",
    "QRDASH_COGNITO_CLIENT_ID",
    "QRDASH_AWS_REGION",
];


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn latency_strategy() -> impl Strategy<Value = LatencyConfig> {
        (any::<bool>(), 0u64..5_000, 0u64..5_000, 0u64..5_000).prop_map(
            |(enabled, login_ms, create_ms, update_ms)| LatencyConfig {
                enabled,
                login_ms,
                create_ms,
                update_ms,
                ..LatencyConfig::default()
            },
        )
    }

    fn qr_config_strategy() -> impl Strategy<Value = QrConfig> {
        (
            "https://[a-z]{3,10}\\.com/[a-z]{1,8}",
            "[1-9][0-9]{1,2}x[1-9][0-9]{1,2}",
            "[A-Za-z ]{1,20}",
            any::<bool>(),
        )
            .prop_map(|(image_service_url, image_size, default_label, seed_demo_data)| QrConfig {
                image_service_url,
                image_size,
                default_label,
                seed_demo_data,
                ..QrConfig::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Serializing a config to YAML and loading it back yields the same values.
        #[test]
        fn config_yaml_roundtrip(latency in latency_strategy(), qr in qr_config_strategy()) {
            let config = Config { latency, qr, ..Config::default() };
            let yaml = serde_yaml::to_string(&config).expect("Failed to serialize config");

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let parsed = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(config.latency.enabled, parsed.latency.enabled);
            prop_assert_eq!(config.latency.login_ms, parsed.latency.login_ms);
            prop_assert_eq!(config.latency.create_ms, parsed.latency.create_ms);
            prop_assert_eq!(config.latency.update_ms, parsed.latency.update_ms);
            prop_assert_eq!(config.qr.image_service_url, parsed.qr.image_service_url);
            prop_assert_eq!(config.qr.image_size, parsed.qr.image_size);
            prop_assert_eq!(config.qr.default_label, parsed.qr.default_label);
            prop_assert_eq!(config.qr.seed_demo_data, parsed.qr.seed_demo_data);
            prop_assert_eq!(config.api, parsed.api);
        }
    }
}
