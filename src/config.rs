use derive_more::Display;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "notes.db";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display(fmt = "PORT must be a port number, got '{}'", _0)]
    InvalidPort(String),
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads `PORT` and `DATABASE_URL`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("PORT").ok(),
            std::env::var("DATABASE_URL").ok(),
        )
    }

    fn from_vars(port: Option<String>, database_url: Option<String>) -> Result<Self, ConfigError> {
        let port = match port {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            port,
            database_url: database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        })
    }
}
