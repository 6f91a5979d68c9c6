//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Analytics configuration (timezone, thresholds, currency).
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Ledger snapshot cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Data source configuration.
    #[serde(default)]
    pub data: DataConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// IANA timezone used for local calendar boundaries (e.g. "Europe/Berlin").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Percentage used at which a budget turns to warning.
    #[serde(default = "default_warning_percent")]
    pub warning_percent: u32,
    /// Percentage used at which a budget turns to critical.
    #[serde(default = "default_critical_percent")]
    pub critical_percent: u32,
    /// Currency code used in reports.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Number of trailing periods returned by trend queries when not specified.
    #[serde(default = "default_trend_months")]
    pub default_trend_months: u32,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_warning_percent() -> u32 {
    80
}

fn default_critical_percent() -> u32 {
    100
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_trend_months() -> u32 {
    6
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            warning_percent: default_warning_percent(),
            critical_percent: default_critical_percent(),
            currency: default_currency(),
            default_trend_months: default_trend_months(),
        }
    }
}

/// Ledger snapshot cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached user snapshots.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a snapshot in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_capacity() -> u64 {
    1000
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Data source configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Optional JSON file used to seed the in-memory ledger.
    pub seed_path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `SPENDWISE__SECTION__KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SPENDWISE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
