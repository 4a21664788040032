use std::{env, net::SocketAddr};

use dotenv::dotenv;

use crate::error::ConfigError;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

        Self::parse(&listen_addr)
    }

    fn parse(listen_addr: &str) -> Result<Self, ConfigError> {
        let listen_addr = listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "LISTEN_ADDR",
                value: listen_addr.to_string(),
            })?;

        Ok(Self { listen_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_addr_parses() {
        let config = Config::parse(DEFAULT_LISTEN_ADDR).unwrap();
        assert_eq!(config.listen_addr.port(), 3000);
    }

    #[test]
    fn bad_listen_addr_is_reported() {
        let err = Config::parse("localhost").unwrap_err();
        assert!(err.to_string().contains("LISTEN_ADDR"));
    }
}
