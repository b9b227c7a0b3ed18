use std::{env, net::SocketAddr};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("BIND_ADDR").ok(), env::var("BIND_PORT").ok())
    }

    pub fn from_vars(
        bind_addr: Option<String>,
        bind_port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind_addr = bind_addr
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let bind_port = bind_port
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(10_000);

        let config = Self {
            bind_addr,
            bind_port,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let config = Config::from_vars(None, None).expect("config should parse");
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.bind_port, 10_000);
    }

    #[test]
    fn custom_bind_parses() {
        let config = Config::from_vars(Some("127.0.0.1".to_string()), Some("8080".to_string()))
            .expect("config should parse");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(
            config.bind_socket().expect("valid socket").to_string(),
            "127.0.0.1:8080"
        );
    }

    #[test]
    fn invalid_port_fails() {
        let err = Config::from_vars(None, Some("not-a-port".to_string()))
            .expect_err("expected invalid port error");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let err = Config::from_vars(Some("not an address".to_string()), None)
            .expect_err("expected invalid socket error");
        assert!(matches!(err, ConfigError::InvalidSocket));
    }
}
