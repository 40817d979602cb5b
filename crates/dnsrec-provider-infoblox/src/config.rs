//! Provider configuration
//!
//! [`InfobloxConfig`] is the caller-supplied part (grid host, WAPI version,
//! credentials). The transport parameters are fixed and live in
//! [`TransportConfig`].

use dnsrec_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// WAPI version used when none is configured
pub const DEFAULT_WAPI_VERSION: &str = "2.12";

/// Infoblox provider configuration
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfobloxConfig {
    /// Grid master host name or address
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,

    /// WAPI version (e.g. "2.12")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// WAPI user name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// WAPI password
    /// ⚠️ NEVER log this value
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl std::fmt::Debug for InfobloxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfobloxConfig")
            .field("host", &self.host)
            .field("version", &self.version)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl InfobloxConfig {
    /// Create a new configuration
    pub fn new(
        host: impl Into<String>,
        version: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            version: version.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `INFOBLOX_HOST` (required)
    /// - `INFOBLOX_WAPI_VERSION` (default: `2.12`)
    /// - `INFOBLOX_USERNAME` (required)
    /// - `INFOBLOX_PASSWORD` (required)
    pub fn from_env() -> Result<Self> {
        let required = |key: &str| {
            env::var(key).map_err(|_| Error::config(format!("{key} environment variable is required")))
        };

        Ok(Self {
            host: required("INFOBLOX_HOST")?,
            version: env::var("INFOBLOX_WAPI_VERSION")
                .unwrap_or_else(|_| DEFAULT_WAPI_VERSION.to_string()),
            username: required("INFOBLOX_USERNAME")?,
            password: required("INFOBLOX_PASSWORD")?,
        })
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&serde_json::from_str(&content)?)
    }

    /// Build configuration from provider fields (e.g. a registry `ProviderSpec`)
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::config("Infoblox host cannot be empty"));
        }
        if self.host.contains("://") || self.host.contains('/') {
            return Err(Error::config(format!(
                "Infoblox host must be a bare host name, got: {}",
                self.host
            )));
        }
        if !is_wapi_version(&self.version) {
            return Err(Error::config(format!(
                "Invalid WAPI version '{}': expected e.g. 2.12",
                self.version
            )));
        }
        if self.username.is_empty() {
            return Err(Error::config("Infoblox username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(Error::config("Infoblox password cannot be empty"));
        }
        Ok(())
    }

    /// Host part of the connection settings
    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            scheme: "https".to_string(),
            host: self.host.clone(),
            port: 443,
            version: self.version.clone(),
        }
    }

    /// Credential part of the connection settings
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

fn is_wapi_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Where the WAPI lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// URL scheme ("https" in production)
    pub scheme: String,
    /// Grid master host
    pub host: String,
    /// TCP port
    pub port: u16,
    /// WAPI version
    pub version: String,
}

impl HostConfig {
    /// Base URL of the WAPI, ending with a slash
    ///
    /// e.g. `https://gridmaster.example.com:443/wapi/v2.12/`
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/wapi/v{}/",
            self.scheme, self.host, self.port, self.version
        )
    }
}

/// WAPI credentials
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// User name
    pub username: String,
    /// Password
    pub password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Fixed HTTP transport parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Verify the appliance's TLS certificate
    pub ssl_verify: bool,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Idle connections kept per host
    pub pool_connections: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ssl_verify: false,
            request_timeout: Duration::from_secs(20),
            pool_connections: 10,
        }
    }
}
