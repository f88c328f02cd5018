//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `CLIMATE_API_*` environment variables. Command-line flags are applied on
//! top by the CLI before the result is validated.

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_FILE, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_SITE_TITLE, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// sqlx SQLite URL of the observations database
    #[validate(length(min = 1))]
    pub database_url: String,

    #[validate(custom(function = "validate_bind_address"))]
    pub bind_address: String,

    #[validate(range(min = 1, max = 64))]
    pub max_connections: u32,

    /// Heading shown on the HTML index page
    #[validate(length(min = 1))]
    pub site_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            site_title: DEFAULT_SITE_TITLE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load layered configuration. An explicit file must exist; the default
    /// `climate-api.toml` is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("max_connections", DEFAULT_MAX_CONNECTIONS as i64)?
            .set_default("site_title", DEFAULT_SITE_TITLE)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }

    pub fn with_bind_address(mut self, bind_address: Option<String>) -> Self {
        if let Some(addr) = bind_address {
            self.bind_address = addr;
        }
        self
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

fn validate_bind_address(value: &str) -> std::result::Result<(), ValidationError> {
    value
        .parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("bind_address"))
}
