use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Apply embedded migrations on startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// `*` allows any origin.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origins: default_origins() }
    }
}

fn default_max_connections() -> u32 { 5 }

fn default_true() -> bool { true }

fn default_origins() -> Vec<String> { vec!["*".to_string()] }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `LODGING__DATABASE__URL=postgres://...`
            .add_source(
                config::Environment::with_prefix("LODGING")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
