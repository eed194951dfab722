use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_NAME: &str = "myproject_db";
pub const DEFAULT_DB_USER: &str = "root";

/// Process configuration, read once at startup.
///
/// Keys are flat so that they line up one-to-one with the environment
/// variables the service recognizes (`DB_HOST`, `PORT`, `DEBUG`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub bind_address: String,
    pub port: u16,
    /// Raises log verbosity and exposes raw database error text to clients.
    /// `FLASK_DEBUG` is honored as an alias.
    pub debug: bool,
    /// Apply the bundled schema before serving.
    pub run_migrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: 5432,
            db_name: DEFAULT_DB_NAME.to_string(),
            db_user: DEFAULT_DB_USER.to_string(),
            db_password: String::new(),
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            run_migrations: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and the environment
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(config::Environment::default())
    }

    fn load_from(environment: config::Environment) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(environment)
            .build()?;

        // FLASK_DEBUG is accepted alongside DEBUG; either one enables debug mode
        let legacy_debug = match config.get_bool("flask_debug") {
            Ok(flag) => flag,
            Err(config::ConfigError::NotFound(_)) => false,
            Err(e) => return Err(e.into()),
        };

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.debug |= legacy_debug;
        Ok(app_config)
    }

    /// True while any of the insecure local-development credentials are in effect
    pub fn uses_default_credentials(&self) -> bool {
        self.db_user == DEFAULT_DB_USER && self.db_password.is_empty()
    }

    /// Connection options for the relational store
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .database(&self.db_name)
            .username(&self.db_user)
            .password(&self.db_password)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::load_from(env(&[])).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server_address(), "0.0.0.0:5000");
        assert!(config.uses_default_credentials());
        assert!(!config.debug);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::load_from(env(&[
            ("DB_HOST", "db.internal"),
            ("DB_NAME", "shop"),
            ("DB_USER", "shop_rw"),
            ("DB_PASSWORD", "s3cret"),
            ("PORT", "8080"),
            ("DEBUG", "true"),
        ]))
        .unwrap();

        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_name, "shop");
        assert_eq!(config.db_user, "shop_rw");
        assert_eq!(config.db_password, "s3cret");
        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert!(!config.uses_default_credentials());
    }

    #[test]
    fn debug_accepts_numeric_toggle() {
        let config = AppConfig::load_from(env(&[("DEBUG", "1")])).unwrap();
        assert!(config.debug);
    }

    #[test]
    fn flask_debug_is_an_alias_for_debug() {
        let config = AppConfig::load_from(env(&[("FLASK_DEBUG", "True")])).unwrap();
        assert!(config.debug);

        let config = AppConfig::load_from(env(&[("FLASK_DEBUG", "false")])).unwrap();
        assert!(!config.debug);

        let config =
            AppConfig::load_from(env(&[("FLASK_DEBUG", "false"), ("DEBUG", "yes")])).unwrap();
        assert!(config.debug);
    }

    #[test]
    fn invalid_flask_debug_is_rejected() {
        assert!(AppConfig::load_from(env(&[("FLASK_DEBUG", "maybe")])).is_err());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(AppConfig::load_from(env(&[("PORT", "not-a-port")])).is_err());
    }
}
