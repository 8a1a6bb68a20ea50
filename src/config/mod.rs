use anyhow::{anyhow, Context as _, Result};
use std::{env, fs, io::ErrorKind, path::Path};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "tops.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

#[derive(Debug)]
pub struct Config {
    pub db: Db,
}

impl Config {
    /// Load the configuration from `file_path` or from `tops.toml`
    /// in the working directory.
    ///
    /// Only a missing `tops.toml` falls back to the embedded defaults,
    /// an explicitly requested file must exist. The database URL can
    /// be overridden by the `DATABASE_URL` environment variable.
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: Option<&Path> = file_path.as_ref().map(|p| p.as_ref());
        let raw_config = match file_path {
            Some(file_path) => {
                let cfg_string = fs::read_to_string(file_path).with_context(|| {
                    format!("Failed to read configuration file {}", file_path.display())
                })?;
                toml::from_str(&cfg_string)?
            }
            None => {
                log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
                match fs::read_to_string(DEFAULT_CONFIG_FILE_NAME) {
                    Ok(cfg_string) => toml::from_str(&cfg_string)?,
                    Err(err) => match err.kind() {
                        ErrorKind::NotFound => {
                            log::info!(
                                "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                            );
                            raw::Config::default()
                        }
                        _ => return Err(err.into()),
                    },
                }
            }
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.override_db_url(env::var(ENV_NAME_DB_URL).ok());
        Ok(cfg)
    }

    pub fn override_db_url(&mut self, db_url: Option<String>) {
        if let Some(db_url) = db_url.filter(|url| !url.trim().is_empty()) {
            log::debug!("Overriding database URL with {db_url}");
            self.db.conn_sqlite = db_url;
        }
    }
}

#[derive(Debug)]
pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u32,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db } = from;

        let defaults = raw::Db::default();
        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let conn_sqlite = connection_sqlite
            .or(defaults.connection_sqlite)
            .ok_or_else(|| anyhow!("Missing SQLite connection configuration"))?;
        let conn_pool_size = connection_pool_size
            .or(defaults.connection_pool_size)
            .ok_or_else(|| anyhow!("Missing connection pool size configuration"))?;
        if conn_pool_size == 0 {
            return Err(anyhow!("The connection pool size must be at least 1"));
        }

        let db = Db {
            conn_sqlite,
            conn_pool_size,
        };

        Ok(Self { db })
    }
}
