use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/nivesh.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid host '{0}'")]
    InvalidHost(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Reject unknown schemes and out-of-range inputs instead of falling
    /// back to the legacy fixed-deposit calculation.
    pub strict_dispatch: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            strict_dispatch: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reads `path` when it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ServerConfig::from_toml("").expect("empty toml is valid");
        assert_eq!(config, ServerConfig::default());
        assert!(config.strict_dispatch);
    }

    #[test]
    fn config_overrides_selected_fields() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9090
            strict_dispatch = false
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert!(!config.strict_dispatch);
    }

    #[test]
    fn config_rejects_wrong_types() {
        let err = ServerConfig::from_toml("port = \"eighty\"").expect_err("must reject");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn socket_addr_requires_ip_host() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            strict_dispatch: true,
        };
        assert_eq!(
            config.socket_addr().expect("valid addr").to_string(),
            "127.0.0.1:3000"
        );

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(bad.socket_addr(), Err(ConfigError::InvalidHost(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ServerConfig::load_or_default(Path::new("does/not/exist.toml"))
            .expect("defaults");
        assert_eq!(config, ServerConfig::default());
    }
}
