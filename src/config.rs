use std::path::{Path, PathBuf};

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_DATABASE_PATH: &str = "/app/contenidos.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub content_service: ContentServiceConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentServiceConfig {
    pub port: u16,
}

impl Default for ContentServiceConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub port: u16,
    /// User/auth service
    pub users_url: String,
    /// Recommendations, trending and history
    pub interactions_url: String,
    /// Catalog service
    pub content_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            users_url: "http://127.0.0.1:8001".to_string(),
            interactions_url: "http://127.0.0.1:8002".to_string(),
            content_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Parsed base URLs of the services the gateway talks to.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub users: Url,
    pub interactions: Url,
    pub content: Url,
}

impl GatewayConfig {
    pub fn endpoints(&self) -> Result<ServiceEndpoints> {
        Ok(ServiceEndpoints {
            users: parse_base_url("users", &self.users_url)?,
            interactions: parse_base_url("interactions", &self.interactions_url)?,
            content: parse_base_url("content", &self.content_url)?,
        })
    }
}

fn parse_base_url(service: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).wrap_err_with(|| format!("Invalid {service} service URL: {raw}"))?;
    if url.cannot_be_a_base() {
        return Err(eyre!("Invalid {service} service URL: {raw} cannot be a base"));
    }
    Ok(url)
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("streamflix").join("config.toml"))
    }

    /// Load the default config file, or built-in defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the default config to the default location
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or(eyre!("No config directory on this platform"))?;
        Self::write_default(&path)?;
        Ok(path)
    }

    fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(eyre!("Config file already exists: {}", path.display()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(&Self::default()).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .context(format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Store path with `~/` expanded
    pub fn database_path(&self) -> PathBuf {
        expand_path(&self.database.path)
    }
}

fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gateway]
            users_url = "http://users:8001"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.users_url, "http://users:8001");
        assert_eq!(config.gateway.port, 8003);
        assert_eq!(config.content_service.port, 8000);
        assert_eq!(config.database.path, DEFAULT_DATABASE_PATH);
    }

    #[test]
    fn test_endpoints_parse() {
        let endpoints = GatewayConfig::default().endpoints().unwrap();
        assert_eq!(endpoints.content.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(endpoints.users.port(), Some(8001));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = GatewayConfig {
            interactions_url: "not a url".to_string(),
            ..GatewayConfig::default()
        };

        let err = config.endpoints().unwrap_err();
        assert!(err.to_string().contains("interactions"));
    }

    #[test]
    fn test_expand_home_path() {
        let path = expand_path("~/catalog/contenidos.db");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("catalog/contenidos.db"));
        }
        assert_eq!(expand_path("/app/contenidos.db"), PathBuf::from("/app/contenidos.db"));
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streamflix").join("config.toml");

        Config::write_default(&path).unwrap();
        let written = Config::from_file(&path).unwrap();
        assert_eq!(written.gateway.content_url, "http://127.0.0.1:8000");

        assert!(Config::write_default(&path).is_err());
    }
}
