//! Compile-time configuration of the geocoding service.
//!
//! The Nominatim endpoint is defined in `services/nominatim.toml` and
//! embedded at compile time. Environment variables can override the parts
//! that differ between deployments:
//!
//! - `GEO_AID_BASE_URL`: search endpoint (e.g., a self-hosted instance).
//! - `GEO_AID_USER_AGENT`: `User-Agent` header sent with every request.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the search endpoint.
pub const BASE_URL_ENV: &str = "GEO_AID_BASE_URL";

/// Environment variable overriding the `User-Agent` header.
pub const USER_AGENT_ENV: &str = "GEO_AID_USER_AGENT";

const NOMINATIM_TOML: &str = include_str!("../services/nominatim.toml");

/// Errors from loading the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The embedded TOML is malformed.
    #[error("Failed to parse geocoding service config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured base URL is empty.
    #[error("Geocoding service '{id}' has an empty base_url")]
    MissingBaseUrl {
        /// Service identifier.
        id: String,
    },
}

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingServiceConfig {
    /// Unique identifier (e.g., `"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint (e.g., `"https://nominatim.openstreetmap.org/search"`).
    pub base_url: String,
    /// Value for the `User-Agent` header.
    pub user_agent: String,
    /// Request timeout. Unset means the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl GeocodingServiceConfig {
    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Replaces the base URL when `base_url` is `Some` and non-empty.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    fn with_user_agent(mut self, user_agent: Option<&str>) -> Self {
        if let Some(ua) = user_agent.filter(|u| !u.trim().is_empty()) {
            self.user_agent = ua.trim().to_string();
        }
        self
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl { id: self.id });
        }
        Ok(self)
    }
}

/// Parses a service definition from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError`] if the TOML is malformed or the base URL is
/// empty.
pub fn parse_service(toml_str: &str) -> Result<GeocodingServiceConfig, ConfigError> {
    let config: GeocodingServiceConfig = toml::de::from_str(toml_str)?;
    config.validated()
}

/// Returns the embedded Nominatim configuration without environment
/// overrides.
///
/// # Errors
///
/// Returns [`ConfigError`] if the embedded TOML is malformed.
pub fn nominatim() -> Result<GeocodingServiceConfig, ConfigError> {
    parse_service(NOMINATIM_TOML)
}

/// Returns the Nominatim configuration with `base_url` and `user_agent`
/// applied. `None`, empty and whitespace-only values keep the embedded
/// defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the embedded TOML is malformed.
pub fn nominatim_with(
    base_url: Option<&str>,
    user_agent: Option<&str>,
) -> Result<GeocodingServiceConfig, ConfigError> {
    Ok(nominatim()?
        .with_base_url(base_url)
        .with_user_agent(user_agent))
}

/// Returns the Nominatim configuration with `GEO_AID_BASE_URL` and
/// `GEO_AID_USER_AGENT` applied.
///
/// # Errors
///
/// Returns [`ConfigError`] if the embedded TOML is malformed.
pub fn nominatim_from_env() -> Result<GeocodingServiceConfig, ConfigError> {
    let base_url = std::env::var(BASE_URL_ENV).ok();
    let user_agent = std::env::var(USER_AGENT_ENV).ok();

    let config = nominatim_with(base_url.as_deref(), user_agent.as_deref())?;

    log::debug!(
        "Using geocoding service '{}' at {}",
        config.id,
        config.base_url
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_nominatim() {
        let svc = nominatim().unwrap();
        assert_eq!(svc.id, "nominatim");
        assert!(!svc.name.is_empty());
        assert_eq!(svc.base_url, "https://nominatim.openstreetmap.org/search");
        assert!(!svc.user_agent.is_empty());
        assert!(svc.timeout().is_none());
    }

    #[test]
    fn base_url_override_ignores_blank() {
        let svc = nominatim()
            .unwrap()
            .with_base_url(Some("  http://localhost:8080/search "));
        assert_eq!(svc.base_url, "http://localhost:8080/search");

        let svc = nominatim().unwrap().with_base_url(Some("   "));
        assert_eq!(svc.base_url, "https://nominatim.openstreetmap.org/search");
    }

    #[test]
    fn overrides_apply_trimmed() {
        let svc = nominatim_with(
            Some(" http://geo.internal/search "),
            Some("  my-app/2.0 (ops@example.com) "),
        )
        .unwrap();
        assert_eq!(svc.base_url, "http://geo.internal/search");
        assert_eq!(svc.user_agent, "my-app/2.0 (ops@example.com)");
    }

    #[test]
    fn missing_or_blank_overrides_keep_defaults() {
        let defaults = nominatim().unwrap();

        let svc = nominatim_with(None, None).unwrap();
        assert_eq!(svc.base_url, defaults.base_url);
        assert_eq!(svc.user_agent, defaults.user_agent);

        let svc = nominatim_with(Some(""), Some("   ")).unwrap();
        assert_eq!(svc.base_url, defaults.base_url);
        assert_eq!(svc.user_agent, "geo-aid/0.1");
    }

    #[test]
    fn user_agent_override_leaves_base_url_alone() {
        let svc = nominatim_with(None, Some("other/1.0")).unwrap();
        assert_eq!(svc.user_agent, "other/1.0");
        assert_eq!(svc.base_url, "https://nominatim.openstreetmap.org/search");
    }

    #[test]
    fn command_line_base_url_beats_environment() {
        let from_env = nominatim_with(Some("http://env.example/search"), None).unwrap();

        let svc = from_env
            .clone()
            .with_base_url(Some("http://flag.example/search"));
        assert_eq!(svc.base_url, "http://flag.example/search");

        let svc = from_env.with_base_url(None);
        assert_eq!(svc.base_url, "http://env.example/search");
    }

    #[test]
    fn parses_timeout() {
        let svc = parse_service(
            r#"
            id = "local"
            name = "Local"
            base_url = "http://localhost:8080/search"
            user_agent = "test"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(svc.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = parse_service(
            r#"
            id = "broken"
            name = "Broken"
            base_url = ""
            user_agent = "test"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl { id } if id == "broken"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            parse_service("id = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
