use std::{env, net::SocketAddr, path::Path, sync::OnceLock};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the booking service,
/// including server, database, and tracing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Server configuration settings
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// Server configuration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// gRPC server bind address
    #[serde(default = "default_grpc_address")]
    pub grpc_address: SocketAddr,
    /// HTTP/JSON gateway bind address
    #[serde(default = "default_http_address")]
    pub http_address: SocketAddr,
}

/// Database configuration.
///
/// Supports either in-memory storage or `PostgreSQL` database.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum DatabaseConfig {
    /// In-memory database storage
    Memory,
    /// `PostgreSQL` database connection
    Postgres(PostgresConfig),
}

/// `PostgreSQL` database configuration.
///
/// A full `connection` string takes precedence over the individual
/// parameters. TLS is never requested.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresConfig {
    /// `PostgreSQL` connection string
    pub connection: Option<String>,
    #[serde(default = "default_postgres_host")]
    pub host: String,
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    #[serde(default = "default_postgres_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_postgres_name")]
    pub name: String,
    /// Upper bound of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Tracing configuration.
///
/// Controls how tracing data is output from the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum TracingConfig {
    /// Log events only, spans are not exported
    Memory,
    /// Standard output tracing
    Stdout,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "BOOKING_CONFIG_PATH";
const ENV_PREFIX: &str = "BOOKING";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

/// Connection variables read by earlier deployments, mapped to their keys.
const DATABASE_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

fn default_grpc_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 50052))
}

fn default_http_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8081))
}

fn default_postgres_host() -> String {
    "localhost".into()
}

const fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_user() -> String {
    "postgres".into()
}

fn default_postgres_name() -> String {
    "booking".into()
}

const fn default_max_connections() -> u32 {
    10
}

impl AppConfig {
    /// Gets the global application configuration instance.
    ///
    /// The first call loads the configuration. Later calls return the same
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn get() -> AppResult<&'static Self> {
        static INSTANCE: OnceLock<AppConfig> = OnceLock::new();
        if let Some(config) = INSTANCE.get() {
            return Ok(config);
        }
        let config = Self::load()?;
        Ok(INSTANCE.get_or_init(|| config))
    }

    /// Loads configuration from files and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        let config_path = Path::new(&config_path);

        let mut config_builder =
            Config::builder().set_default(DISTRIBUTION_VERSION_KEY, VERSION)?;

        // Initial "default" configuration file
        config_builder = config_builder.add_source(File::from(config_path.join("default")));

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        config_builder =
            config_builder.add_source(File::from(config_path.join("local")).required(false));

        // Add override settings file.
        if let Ok(override_path) = env::var(CONFIG_PATH_ENV) {
            config_builder =
                config_builder.add_source(File::with_name(&override_path).required(false));
        }

        // Add in settings from the environment (with a prefix of BOOKING)
        config_builder =
            config_builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        config_builder = apply_database_env(config_builder, |name| env::var(name).ok())?;

        Ok(config_builder.build()?.try_deserialize()?)
    }
}

/// Overrides the `PostgreSQL` parameters with the plain `DB_*` variables.
fn apply_database_env<F>(
    mut config_builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> AppResult<ConfigBuilder<DefaultState>>
where
    F: Fn(&str) -> Option<String>,
{
    for (name, key) in DATABASE_ENV_OVERRIDES {
        config_builder = config_builder.set_override_option(*key, lookup(name))?;
    }
    Ok(config_builder)
}
