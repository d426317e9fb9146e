use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;

/// Default Mobbex API base URL
pub const DEFAULT_BASE_URL: &str = "https://mobbex.com";

/// Default request timeout; checkout redirects tolerate slow processor responses
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Gateway configuration, supplied by the host checkout framework.
///
/// The gateway never looks settings up globally; every core operation
/// receives this struct (or a type holding it) explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Whether the gateway is offered at checkout at all
    pub enabled: bool,
    /// Title shown to buyers during checkout
    pub title: String,
    /// Description shown to buyers during checkout
    pub description: String,
    /// Instructions appended to the thank-you page and order emails by the host
    pub instructions: String,
    /// Mobbex API key
    pub api_key: String,
    /// Mobbex access token
    pub access_token: String,
    /// Write request/response pairs to the audit log
    pub debug: bool,
    /// Mobbex API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Mobbex".to_string(),
            description: "Pay with Mobbex.".to_string(),
            instructions: String::new(),
            api_key: String::new(),
            access_token: String::new(),
            debug: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Human-renderable environment warning for the host's admin surface.
///
/// The gateway only computes these; rendering belongs to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// API key or access token missing while the gateway is enabled
    MissingCredentials,
    /// Configured endpoint does not use HTTPS
    InsecureEndpoint { url: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MissingCredentials => {
                write!(f, "Mobbex error: please enter your API key and access token")
            }
            Warning::InsecureEndpoint { url } => {
                write!(
                    f,
                    "Mobbex is enabled but the endpoint {} is not HTTPS; credentials would travel in the clear",
                    url
                )
            }
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("MOBBEX_API_KEY").context("MOBBEX_API_KEY not set")?;
        let access_token =
            env::var("MOBBEX_ACCESS_TOKEN").context("MOBBEX_ACCESS_TOKEN not set")?;

        let enabled = env::var("MOBBEX_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let title = env::var("MOBBEX_TITLE").unwrap_or_else(|_| "Mobbex".to_string());
        let description =
            env::var("MOBBEX_DESCRIPTION").unwrap_or_else(|_| "Pay with Mobbex.".to_string());
        let instructions = env::var("MOBBEX_INSTRUCTIONS").unwrap_or_default();

        let debug = env::var("MOBBEX_DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let base_url = env::var("MOBBEX_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("MOBBEX_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .context("MOBBEX_TIMEOUT_SECS must be a valid number")?;

        let config = GatewayConfig {
            enabled,
            title,
            description,
            instructions,
            api_key,
            access_token,
            debug,
            base_url,
            timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("MOBBEX_BASE_URL cannot be empty"));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(anyhow!(
                "MOBBEX_BASE_URL must be an http(s) URL, got {}",
                self.base_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("MOBBEX_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }

    /// Whether the gateway may be offered at checkout.
    pub fn is_available(&self) -> bool {
        if !self.enabled {
            return false;
        }

        if self.api_key.trim().is_empty() || self.access_token.trim().is_empty() {
            return false;
        }

        true
    }

    /// Environment warnings for the host's admin surface. Empty when the
    /// gateway is disabled, matching the availability gate.
    pub fn check_environment(&self) -> Vec<Warning> {
        if !self.enabled {
            return Vec::new();
        }

        let mut warnings = Vec::new();

        if self.api_key.trim().is_empty() || self.access_token.trim().is_empty() {
            warnings.push(Warning::MissingCredentials);
        }

        if !self.base_url.starts_with("https://") {
            warnings.push(Warning::InsecureEndpoint {
                url: self.base_url.clone(),
            });
        }

        warnings
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "no" | "false" | "0" | "off" | ""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> GatewayConfig {
        GatewayConfig {
            api_key: "key".to_string(),
            access_token: "token".to_string(),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 45);
        assert!(config.enabled);
        assert!(!config.debug);
    }

    #[test]
    fn test_unavailable_without_credentials() {
        let config = GatewayConfig::default();
        assert!(!config.is_available());

        let mut config = configured();
        assert!(config.is_available());

        config.access_token = "  ".to_string();
        assert!(!config.is_available());
    }

    #[test]
    fn test_unavailable_when_disabled() {
        let mut config = configured();
        config.enabled = false;
        assert!(!config.is_available());
    }

    #[test]
    fn test_check_environment_reports_missing_credentials() {
        let config = GatewayConfig::default();
        assert_eq!(config.check_environment(), vec![Warning::MissingCredentials]);

        let config = configured();
        assert!(config.check_environment().is_empty());
    }

    #[test]
    fn test_check_environment_silent_when_disabled() {
        let mut config = GatewayConfig::default();
        config.enabled = false;
        assert!(config.check_environment().is_empty());
    }

    #[test]
    fn test_check_environment_flags_plain_http_endpoint() {
        let mut config = configured();
        config.base_url = "http://localhost:8080".to_string();
        assert_eq!(
            config.check_environment(),
            vec![Warning::InsecureEndpoint {
                url: "http://localhost:8080".to_string()
            }]
        );
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = configured();
        config.base_url = "mobbex.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://mobbex.com".to_string();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
