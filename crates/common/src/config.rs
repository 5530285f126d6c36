//! Application configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Seeding configuration.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (`postgres://...` or `sqlite://...`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Configuration for seeding movies from TMDB.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// TMDB API key. Seeding refuses to run without one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// TMDB API base URL.
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    /// Prefix prepended to poster paths.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Number of discover pages to fetch, starting at page 1.
    #[serde(default = "default_pages")]
    pub pages: u32,
    /// Choice values created for every seeded movie.
    #[serde(default = "default_choices")]
    pub choices: Vec<i32>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
            pages: default_pages(),
            choices: default_choices(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w1280".to_string()
}

const fn default_pages() -> u32 {
    1
}

fn default_choices() -> Vec<i32> {
    (1..=10).collect()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `CINEPOLL_ENV`)
    /// 4. Environment variables with `CINEPOLL__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("CINEPOLL_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CINEPOLL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse(
            r#"
            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.seed.pages, 1);
        assert_eq!(config.seed.choices, (1..=10).collect::<Vec<_>>());
        assert!(config.seed.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [server]
            port = 9000

            [database]
            url = "postgres://localhost/cinepoll"
            min_connections = 2

            [seed]
            api_key = "secret"
            pages = 3
            choices = [1, 5]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.seed.api_key.as_deref(), Some("secret"));
        assert_eq!(config.seed.pages, 3);
        assert_eq!(config.seed.choices, vec![1, 5]);
        assert_eq!(config.seed.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(parse("[server]\nport = 1").is_err());
    }
}
