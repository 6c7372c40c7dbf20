//! Configuration management for the Timber Yard Dispatch Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with TIMBER_ prefix

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Which package repository backs the service
    pub storage: StorageConfig,

    /// Option lists offered when packing
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    /// Process-local storage, lost on restart
    Memory,
}

/// Species, finishes and the other picklists shown on the packing form
///
/// Packages are not checked against these lists; a value outside them is
/// stored as typed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    pub species: Vec<String>,
    pub finishes: Vec<String>,
    pub certifications: Vec<String>,
    pub product_types: Vec<String>,
    pub drying: Vec<String>,
}

const CATALOG_LIST_KEYS: [&str; 5] = [
    "catalog.species",
    "catalog.finishes",
    "catalog.certifications",
    "catalog.product_types",
    "catalog.drying",
];

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("TIMBER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "postgres://localhost/timber_yard")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("storage.backend", "postgres")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TIMBER_ prefix)
            // TIMBER_CATALOG__SPECIES=Pino,Ciprés
            .add_source(
                CATALOG_LIST_KEYS.iter().fold(
                    Environment::with_prefix("TIMBER")
                        .separator("__")
                        .list_separator(",")
                        .try_parsing(true),
                    |env, key| env.with_list_parse_key(key),
                ),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/timber_yard".to_string(),
                max_connections: 10,
                min_connections: 2,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            catalog: CatalogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let owned =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            species: owned(&["Pino", "Ciprés"]),
            finishes: owned(&["S4S", "Cepillado"]),
            certifications: owned(&["FSC", "PEFC"]),
            product_types: owned(&["Decking", "Flooring"]),
            drying: owned(&["KD", "AD"]),
        }
    }
}
