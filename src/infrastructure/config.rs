//! Configuration loaded from the environment

use std::{env, net::SocketAddr};

pub const DEFAULT_DATABASE: &str = "foodapp";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MONGODB_URI environment variable is not configured. Please add it to your .env.local file.")]
    MissingMongoUri,

    #[error("unknown FOOD_STORE `{0}` (expected `mongo` or `memory`)")]
    UnknownStore(String),

    #[error("invalid BIND_ADDRESS `{0}`")]
    InvalidBindAddress(String),
}

/// Which backend serves the `foods` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Mongo { uri: String, database: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub bind_address: SocketAddr,
}

impl AppConfig {
    /// Reads `.env.local` and `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store = match get("FOOD_STORE").as_deref().unwrap_or("mongo") {
            "mongo" => StoreConfig::Mongo {
                uri: get("MONGODB_URI").ok_or(ConfigError::MissingMongoUri)?,
                database: get("MONGODB_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            },
            "memory" => StoreConfig::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let bind = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind.clone()))?;

        Ok(Self {
            store,
            bind_address,
        })
    }
}
