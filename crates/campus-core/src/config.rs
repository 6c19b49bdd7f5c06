//! Gateway configuration.
//!
//! Loaded from an optional TOML file; the CLI layers flags and environment
//! variables on top before calling [`GatewayConfig::validate`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CampusError, CampusResult};

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 5001;

/// Default per-request timeout for outbound calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default JSON body limit (5 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Config file names searched in the working directory.
const CONFIG_CANDIDATES: &[&str] = &["campus-bridge.toml", ".campus-bridge.toml"];

/// Deployment environment. Controls the CORS policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(CampusError::config(format!("Unknown environment: {}", other))),
        }
    }
}

/// Generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key. Required to start the server.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// The single origin allowed in production.
    pub allowed_origin: Option<String>,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            environment: Environment::default(),
            allowed_origin: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// External code runner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Runner endpoint; `/api/execute` answers 503 when unset.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
    pub execution: ExecutionConfig,
}

impl GatewayConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> CampusResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> CampusResult<Self> {
        toml::from_str(content).map_err(|e| CampusError::config(e.to_string()))
    }

    /// Load `path` if given, else the first config file found in `dir`, else defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load_or_default(path: Option<&Path>, dir: &Path) -> CampusResult<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(CampusError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        for candidate in CONFIG_CANDIDATES {
            let candidate = dir.join(candidate);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Loading config file");
                return Self::load(candidate);
            }
        }

        Ok(Self::default())
    }

    /// The API key, if set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Check settings needed by the generation client.
    pub fn validate_gemini(&self) -> CampusResult<()> {
        if self.api_key().is_none() {
            return Err(CampusError::config(
                "GEMINI_API_KEY is not defined. Set it in the environment or the config file.",
            ));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(CampusError::config("Model name must not be empty"));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(CampusError::config("Generation timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Check everything needed before the server starts listening.
    pub fn validate(&self) -> CampusResult<()> {
        self.validate_gemini()?;

        if self.server.environment == Environment::Production
            && self
                .server
                .allowed_origin
                .as_deref()
                .map_or(true, |origin| origin.trim().is_empty())
        {
            return Err(CampusError::config(
                "CAMPUS_ALLOWED_ORIGIN must be set in production",
            ));
        }
        if self.execution.url.is_some() && self.execution.timeout_secs == 0 {
            return Err(CampusError::config("Execution timeout must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.gemini.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.server.body_limit, 5 * 1024 * 1024);
        assert!(config.execution.url.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = GatewayConfig::parse(
            r#"
[gemini]
api_key = "abc"
model = "gemini-1.5-flash"

[server]
port = 8080
environment = "production"
allowed_origin = "https://campus.example.edu"
"#,
        )
        .unwrap();
        assert_eq!(config.api_key(), Some("abc"));
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gemini.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Production);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(
            GatewayConfig::parse("[server]\nport = \"many\""),
            Err(CampusError::Config(_))
        ));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let mut config = GatewayConfig::default();
        assert!(config.validate().is_err());
        config.gemini.api_key = Some("   ".to_string());
        assert!(config.validate().is_err());
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_production_requires_origin() {
        let mut config = with_key();
        config.server.environment = Environment::Production;
        assert!(config.validate().is_err());
        config.server.allowed_origin = Some("https://campus.example.edu".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = with_key();
        config.gemini.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let missing = Path::new("/nonexistent/campus-bridge.toml");
        assert!(GatewayConfig::load_or_default(Some(missing), Path::new(".")).is_err());
    }

    #[test]
    fn test_no_file_falls_back_to_default() {
        let config = GatewayConfig::load_or_default(None, Path::new("/nonexistent-dir")).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
    }
}
