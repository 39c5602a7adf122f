//! Configuration management for the converter server.
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file by the binary). The resulting [`AppConfig`] is built once at
//! startup and never mutated afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default OpenAI-compatible endpoint (Groq).
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default model identifier sent to the provider.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream text-generation provider settings
    pub llm: LlmConfig,

    /// Whether to verify SSL certificates for upstream requests
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// Upper bound in seconds for a single upstream call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Whether error responses carry diagnostic details
    #[serde(default)]
    pub error_details: ErrorDetailPolicy,
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the upstream chat-completions provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL, without the trailing `/chat/completions`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Sanitized API key; `None` when no usable credential was configured
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, kept low for consistent rewrites
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output length cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Whether the raw upstream error text is echoed back to clients.
///
/// The full error is logged either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDetailPolicy {
    #[default]
    Omit,
    Include,
}

impl FromStr for ErrorDetailPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "omit" | "none" | "off" => Ok(Self::Omit),
            "include" | "on" => Ok(Self::Include),
            other => Err(anyhow::anyhow!(
                "invalid error detail policy '{}', expected 'include' or 'omit'",
                other
            )),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    500
}

fn default_verify_ssl() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            verify_ssl: default_verify_ssl(),
            request_timeout_secs: default_request_timeout(),
            error_details: ErrorDetailPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Unset variables fall back to defaults. Set but unparseable values are
    /// rejected with an error naming the variable. A missing API key is not
    /// an error here; see [`LlmConfig::api_key`].
    pub fn from_env() -> Result<Self> {
        let mut config = AppConfig::default();

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_env::<u16>("PORT")? {
            config.server.port = port;
        }

        config.llm.api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .and_then(|raw| sanitize_api_key(&raw));
        if let Ok(base) = std::env::var("GROQ_API_BASE") {
            config.llm.api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            if !model.trim().is_empty() {
                config.llm.model = model.trim().to_string();
            }
        }
        if let Some(temperature) = parse_env::<f32>("LLM_TEMPERATURE")? {
            config.llm.temperature = temperature.clamp(0.0, 2.0);
        }
        if let Some(max_tokens) = parse_env::<u32>("LLM_MAX_TOKENS")? {
            config.llm.max_tokens = max_tokens;
        }

        if let Ok(verify_ssl_str) = std::env::var("VERIFY_SSL") {
            config.verify_ssl = str_to_bool(&verify_ssl_str);
        }
        if let Some(timeout) = parse_env::<u64>("REQUEST_TIMEOUT_SECS")? {
            if timeout == 0 {
                anyhow::bail!("Invalid value for REQUEST_TIMEOUT_SECS: must be at least 1");
            }
            config.request_timeout_secs = timeout;
        }
        if let Some(policy) = parse_env::<ErrorDetailPolicy>("ERROR_DETAILS")? {
            config.error_details = policy;
        }

        Ok(config)
    }

    /// Whether a usable credential is configured.
    pub fn has_credential(&self) -> bool {
        self.llm.api_key.is_some()
    }
}

/// Read and parse an optional environment variable.
fn parse_env<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}

/// Clean up an API key copied into an env file.
///
/// Strips surrounding whitespace and one pair of stray quote characters.
/// Returns `None` if nothing usable remains.
pub fn sanitize_api_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
        })
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

/// Convert string to boolean.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive)
fn str_to_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: &[&str] = &[
        "HOST",
        "PORT",
        "GROQ_API_KEY",
        "GROQ_API_BASE",
        "GROQ_MODEL",
        "LLM_TEMPERATURE",
        "LLM_MAX_TOKENS",
        "VERIFY_SSL",
        "REQUEST_TIMEOUT_SECS",
        "ERROR_DETAILS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_str_to_bool() {
        assert!(str_to_bool("true"));
        assert!(str_to_bool("TRUE"));
        assert!(str_to_bool("1"));
        assert!(str_to_bool("yes"));
        assert!(str_to_bool("On"));
        assert!(!str_to_bool("false"));
        assert!(!str_to_bool("0"));
        assert!(!str_to_bool(""));
        assert!(!str_to_bool("invalid"));
    }

    #[test]
    fn test_sanitize_api_key() {
        assert_eq!(sanitize_api_key("gsk_abc"), Some("gsk_abc".to_string()));
        assert_eq!(sanitize_api_key("  gsk_abc\n"), Some("gsk_abc".to_string()));
        assert_eq!(sanitize_api_key("\"gsk_abc\""), Some("gsk_abc".to_string()));
        assert_eq!(sanitize_api_key("'gsk_abc'"), Some("gsk_abc".to_string()));
        assert_eq!(sanitize_api_key(""), None);
        assert_eq!(sanitize_api_key("   "), None);
        assert_eq!(sanitize_api_key("\"\""), None);
    }

    #[test]
    fn test_sanitize_api_key_mismatched_quotes_kept() {
        assert_eq!(
            sanitize_api_key("\"gsk_abc'"),
            Some("\"gsk_abc'".to_string())
        );
    }

    #[test]
    fn test_error_detail_policy_parse() {
        assert_eq!("include".parse::<ErrorDetailPolicy>().unwrap(), ErrorDetailPolicy::Include);
        assert_eq!("OMIT".parse::<ErrorDetailPolicy>().unwrap(), ErrorDetailPolicy::Omit);
        assert!("verbose".parse::<ErrorDetailPolicy>().is_err());
    }

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.api_base, DEFAULT_API_BASE);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.max_tokens, 500);
        assert!(config.llm.temperature < 0.5);
        assert!(config.verify_ssl);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.error_details, ErrorDetailPolicy::Omit);
        assert!(!config.has_credential());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 5000);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("HOST", "127.0.0.1");
            std::env::set_var("PORT", "9999");
            std::env::set_var("GROQ_API_KEY", "'gsk_test'");
            std::env::set_var("GROQ_API_BASE", "http://localhost:8080/v1/");
            std::env::set_var("GROQ_MODEL", "llama-3.1-8b-instant");
            std::env::set_var("LLM_TEMPERATURE", "5.0");
            std::env::set_var("LLM_MAX_TOKENS", "256");
            std::env::set_var("VERIFY_SSL", "false");
            std::env::set_var("REQUEST_TIMEOUT_SECS", "5");
            std::env::set_var("ERROR_DETAILS", "include");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.llm.api_base, "http://localhost:8080/v1");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.temperature, 2.0);
        assert_eq!(config.llm.max_tokens, 256);
        assert!(!config.verify_ssl);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.error_details, ErrorDetailPolicy::Include);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_number() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "not-a-port");
        }
        let err = AppConfig::from_env().unwrap_err();
        assert!(format!("{:#}", err).contains("PORT"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_timeout() {
        clear_env();
        unsafe {
            std::env::set_var("REQUEST_TIMEOUT_SECS", "0");
        }
        let err = AppConfig::from_env().unwrap_err();
        assert!(format!("{:#}", err).contains("REQUEST_TIMEOUT_SECS"));

        unsafe {
            std::env::set_var("REQUEST_TIMEOUT_SECS", "1");
        }
        assert_eq!(AppConfig::from_env().unwrap().request_timeout_secs, 1);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_key_is_missing() {
        clear_env();
        unsafe {
            std::env::set_var("GROQ_API_KEY", "  \"\"  ");
        }
        let config = AppConfig::from_env().unwrap();
        assert!(!config.has_credential());
        clear_env();
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
