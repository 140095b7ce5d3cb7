use serde::Deserialize;
use std::env;

const DEFAULT_PORT: &str = "3000";
// Local file next to the binary; good enough for dev runs without a .env.
const DEFAULT_DATABASE_URL: &str = "sqlite://shop.db";

/// Runtime settings, resolved once at startup. Defaulting happens here so
/// the repository adapters never have to guess.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| DEFAULT_PORT.into());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        Ok(Self {
            server_port,
            database_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race each other.
    #[test]
    fn env_overrides_and_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_URL");
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_port, "3000");
        assert_eq!(config.database_url, "sqlite://shop.db");

        env::set_var("SERVER_PORT", "8080");
        env::set_var("DATABASE_URL", "sqlite://elsewhere.db");
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_port, "8080");
        assert_eq!(config.database_url, "sqlite://elsewhere.db");

        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_URL");
    }
}
