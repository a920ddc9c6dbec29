use anyhow::{bail, Context};
use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub generation: GenerationConfig,
    pub secrets: SecretsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_json_payload_size: usize,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// API keys and the bearer token. Loaded once at startup and handed to the
/// services that need them.
#[derive(Clone)]
pub struct SecretsConfig {
    pub gemini_api_key: String,
    pub tavily_api_key: String,
    pub bearer_token: String,
}

impl fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretsConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("tavily_api_key", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 2015,
            workers: num_cpus::get(),
            max_json_payload_size: 1_000_000, // 1MB
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.tavily.com/search".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Builds a config with default settings around the given secrets.
    pub fn with_secrets(secrets: SecretsConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            search: SearchConfig::default(),
            generation: GenerationConfig::default(),
            secrets,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets = SecretsConfig {
            gemini_api_key: required(&lookup, "GEMINI_API_KEY")?,
            tavily_api_key: required(&lookup, "TAVILY_API_KEY")?,
            bearer_token: required(&lookup, "MCP_BEARER_TOKEN")?,
        };

        let mut config = Config::with_secrets(secrets);

        // Server configuration
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse_var("PORT", &port)?;
        }
        if let Some(workers) = lookup("WORKERS") {
            config.server.workers = parse_var("WORKERS", &workers)?;
        }
        if let Some(max_json_payload_size) = lookup("MAX_JSON_PAYLOAD_SIZE") {
            config.server.max_json_payload_size =
                parse_var("MAX_JSON_PAYLOAD_SIZE", &max_json_payload_size)?;
        }

        // Search configuration
        if let Some(api_url) = lookup("TAVILY_API_URL") {
            config.search.api_url = api_url;
        }
        if let Some(timeout) = lookup("SEARCH_TIMEOUT_SECS") {
            config.search.timeout_secs = parse_var("SEARCH_TIMEOUT_SECS", &timeout)?;
        }

        // Generation configuration
        if let Some(base_url) = lookup("GEMINI_API_BASE") {
            config.generation.base_url = base_url;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.generation.model = model;
        }
        if let Some(timeout) = lookup("GENERATION_TIMEOUT_SECS") {
            config.generation.timeout_secs = parse_var("GENERATION_TIMEOUT_SECS", &timeout)?;
        }

        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => bail!("{} is set but empty", key),
        None => bail!("{} must be set", key),
    }
}

fn parse_var<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", key, value))
}
