use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
    #[serde(default)]
    pub leeway_seconds: u64,
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Registrations with this email are created as `admin`.
    pub bootstrap_email: Option<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    24
}

impl Config {
    pub const MIN_JWT_SECRET_BYTES: usize = 32;
    /// One year.
    pub const MAX_EXPIRATION_HOURS: i64 = 8760;
    /// Value shipped in config/default.toml.
    pub const DEVELOPMENT_JWT_SECRET: &'static str =
        "development-secret-change-me-at-least-32-bytes";

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Self::environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;
        config.check_run_mode(&run_mode)?;

        Ok(config)
    }

    /// Environment overrides without prefix: JWT__SECRET=... sets jwt.secret
    fn environment() -> Environment {
        Environment::default().separator("__")
    }

    /// Outside development the committed secret must have been overridden.
    pub fn check_run_mode(&self, run_mode: &str) -> Result<(), ConfigError> {
        if run_mode != "development" && self.jwt.secret == Self::DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::Message(format!(
                "jwt.secret still has the development value in run mode '{}'; set JWT__SECRET",
                run_mode
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < Self::MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                Self::MIN_JWT_SECRET_BYTES
            )));
        }
        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.jwt.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}",
                Self::MAX_EXPIRATION_HOURS
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
