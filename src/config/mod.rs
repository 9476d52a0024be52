//! Configuration management
//!
//! This module handles loading and parsing configuration for Villarent.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Outbound mail configuration
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Site-wide settings
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist. Environment variables override file values.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("VILLARENT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("VILLARENT_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("VILLARENT_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(host) = std::env::var("VILLARENT_SMTP_HOST") {
            self.smtp.host = Some(host);
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path (or `:memory:`)
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/villarent.db".to_string()
}

/// Outbound mail configuration.
///
/// When `host` is unset, comment-reply notification is disabled and
/// submissions proceed without the fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host; notification is disabled when absent
    #[serde(default)]
    pub host: Option<String>,
    /// SMTP port
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// SMTP username
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password
    #[serde(default)]
    pub password: Option<String>,
    /// From address for outbound mail
    #[serde(default = "default_smtp_from")]
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            username: None,
            password: None,
            from: default_smtp_from(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_from() -> String {
    "admin@villarent.example".to_string()
}

/// Site-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name used in page titles and notification mail
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Public base URL used when building absolute links
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            base_url: default_base_url(),
        }
    }
}

fn default_site_name() -> String {
    "Villarent".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "data/villarent.db");
        assert!(config.smtp.host.is_none());
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.site.name, "Villarent");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "server:\n  port: 9000\nsite:\n  name: Test Rentals").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.site.name, "Test Rentals");
        assert_eq!(config.database.url, "data/villarent.db");
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "server: [not a map").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
