use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

pub const DEFAULT_ADMIN_PASSWORD: &str = "change-me-in-production";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Credentials accepted by the dashboard login form.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory on disk that backs the `/uploads` URL prefix.
    pub dir: String,
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "public/uploads".to_string(),
            max_file_size: 5 * 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("database.url", "sqlite://incubator.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("admin.username", "admin")?
            .set_default("admin.password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("uploads.dir", "public/uploads")?
            .set_default("uploads.max_file_size", 5 * 1024 * 1024)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with INCUBATOR__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("INCUBATOR").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://incubator.db?mode=rwc".to_string(),
                max_connections: 10,
            },
            admin: AdminConfig {
                username: "admin".to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
            uploads: UploadConfig::default(),
        }
    }
}
