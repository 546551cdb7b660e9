use anyhow::{Context, Result};
use config::{Config as Settings, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub db: DbConfig,
}

#[derive(Clone, PartialEq)]
pub struct DbConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
}

// env vars arrive as one flat namespace
#[derive(Deserialize)]
struct RawConfig {
    host: String,
    port: u16,
    debug: bool,
    db_host: String,
    db_port: u16,
    db_user: String,
    db_password: String,
    db_name: String,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            host: raw.host,
            port: raw.port,
            debug: raw.debug,
            db: DbConfig {
                db_host: raw.db_host,
                db_port: raw.db_port,
                db_user: raw.db_user,
                db_password: raw.db_password,
                db_name: raw.db_name,
            },
        }
    }
}

// keep the password out of logs
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_name", &self.db_name)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads settings from the process environment, after merging in `.env`
    /// when one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::default())
    }

    pub fn from_source(env: Environment) -> Result<Self> {
        let settings = Settings::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 4002)?
            .set_default("debug", false)?
            .set_default("db_host", "localhost")?
            .set_default("db_port", 5432)?
            .set_default("db_user", "postgres")?
            .set_default("db_password", "postgres")?
            .set_default("db_name", "products_db")?
            .add_source(env)
            .build()
            .context("Failed to read configuration")?;
        let raw: RawConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        Ok(raw.into())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = Config::from_source(env_of(&[])).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:4002");
        assert!(!cfg.debug);
        assert_eq!(cfg.db.db_host, "localhost");
        assert_eq!(cfg.db.db_port, 5432);
        assert_eq!(cfg.db.db_user, "postgres");
        assert_eq!(cfg.db.db_password, "postgres");
        assert_eq!(cfg.db.db_name, "products_db");
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = Config::from_source(env_of(&[
            ("PORT", "9000"),
            ("DEBUG", "true"),
            ("DB_HOST", "db"),
            ("DB_NAME", "catalog"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert!(cfg.debug);
        assert_eq!(cfg.db.db_host, "db");
        assert_eq!(cfg.db.db_name, "catalog");
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Config::from_source(env_of(&[("PORT", "not-a-port")])).is_err());
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = Config::from_source(env_of(&[("DB_PASSWORD", "hunter2")])).unwrap();
        assert!(!format!("{:?}", cfg).contains("hunter2"));
    }
}
