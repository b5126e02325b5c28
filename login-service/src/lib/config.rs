use std::collections::HashMap;
use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::credential::ports::ConfigurationProvider;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Signing settings. Read through [`ConfigurationProvider`] on every login,
/// so this typed copy is only used for startup logging and wiring.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// Upper bound for a single credential lookup, in milliseconds
    #[serde(default)]
    pub lookup_timeout_ms: Option<u64>,
}

impl StoreConfig {
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_minutes() -> i64 {
    60
}

impl Config {
    /// Build the layered configuration source.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn layered() -> Result<ConfigBuilder, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()
    }

    /// Load typed configuration from the layered source.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_layered(&Self::layered()?)
    }

    /// Deserialize typed configuration from an already built source.
    pub fn from_layered(layered: &ConfigBuilder) -> Result<Self, ConfigError> {
        layered.clone().try_deserialize()
    }
}

/// Values are looked up with dotted keys, e.g. `jwt.secret`.
impl ConfigurationProvider for ConfigBuilder {
    fn get_value(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }
}

/// Fixed key/value configuration, for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct StaticConfiguration {
    values: HashMap<String, String>,
}

impl StaticConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigurationProvider for StaticConfiguration {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
