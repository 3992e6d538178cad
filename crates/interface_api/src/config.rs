//! API configuration

use serde::Deserialize;

use infra_http::{UpstreamConfig, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_PUBMED_BASE_URL, DEFAULT_RXNAV_BASE_URL};

/// Where the claims catalog and herb table are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Postgres,
    /// The built-in reference catalog; no database needed
    Memory,
}

impl CatalogSource {
    fn as_str(&self) -> &'static str {
        match self {
            CatalogSource::Postgres => "postgres",
            CatalogSource::Memory => "memory",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Some(CatalogSource::Postgres),
            "memory" => Some(CatalogSource::Memory),
            _ => None,
        }
    }
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// AYUSH to WHO candidate mappings CSV
    pub mappings_csv_path: String,
    pub rxnav_base_url: String,
    pub pubmed_base_url: String,
    /// Per-attempt timeout for upstream calls
    pub http_timeout_secs: u64,
    /// Attempts per upstream call, timeouts only
    pub http_retries: u32,
    pub http_retry_backoff_ms: u64,
    pub llm_base_url: String,
    /// Without a key the assessment runs on rules alone
    #[serde(default)]
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub catalog_source: CatalogSource,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "postgres://localhost/swasthyasetu".to_string(),
            log_level: "info".to_string(),
            mappings_csv_path: "data/ayush_who_mappings.csv".to_string(),
            rxnav_base_url: DEFAULT_RXNAV_BASE_URL.to_string(),
            pubmed_base_url: DEFAULT_PUBMED_BASE_URL.to_string(),
            http_timeout_secs: 30,
            http_retries: 3,
            http_retry_backoff_ms: 1500,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            catalog_source: CatalogSource::Postgres,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables over the defaults
    ///
    /// A bare `DATABASE_URL` is honoured when `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port.to_string())?
            .set_default("database_url", database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("mappings_csv_path", defaults.mappings_csv_path)?
            .set_default("rxnav_base_url", defaults.rxnav_base_url)?
            .set_default("pubmed_base_url", defaults.pubmed_base_url)?
            .set_default("http_timeout_secs", defaults.http_timeout_secs.to_string())?
            .set_default("http_retries", defaults.http_retries.to_string())?
            .set_default("http_retry_backoff_ms", defaults.http_retry_backoff_ms.to_string())?
            .set_default("llm_base_url", defaults.llm_base_url)?
            .set_default("llm_model", defaults.llm_model)?
            .set_default("catalog_source", defaults.catalog_source.as_str())?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Reads each variable on its own, keeping the default for anything
    /// missing or unparseable
    pub fn from_individual_vars() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("API_HOST", defaults.host),
            port: env_parse("API_PORT", defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            mappings_csv_path: env_or("API_MAPPINGS_CSV_PATH", defaults.mappings_csv_path),
            rxnav_base_url: env_or("API_RXNAV_BASE_URL", defaults.rxnav_base_url),
            pubmed_base_url: env_or("API_PUBMED_BASE_URL", defaults.pubmed_base_url),
            http_timeout_secs: env_parse("API_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            http_retries: env_parse("API_HTTP_RETRIES", defaults.http_retries),
            http_retry_backoff_ms: env_parse("API_HTTP_RETRY_BACKOFF_MS", defaults.http_retry_backoff_ms),
            llm_base_url: env_or("API_LLM_BASE_URL", defaults.llm_base_url),
            llm_api_key: std::env::var("API_LLM_API_KEY").ok(),
            llm_model: env_or("API_LLM_MODEL", defaults.llm_model),
            catalog_source: std::env::var("API_CATALOG_SOURCE")
                .ok()
                .and_then(|v| CatalogSource::parse(&v))
                .unwrap_or(defaults.catalog_source),
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig::new(self.http_timeout_secs, self.http_retries, self.http_retry_backoff_ms)
    }

    /// The LLM key, if one is configured and not blank
    pub fn llm_key(&self) -> Option<&str> {
        self.llm_api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
