//! Server configuration
//!
//! Layered: built-in defaults, then an optional `blog.toml` in the working
//! directory, then `BLOG_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const CONFIG_FILE_STEM: &str = "blog";
pub const ENV_PREFIX: &str = "BLOG";

type ConfigFile = File<config::FileSourceFile, config::FileFormat>;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    /// Static document served at `/`
    pub index_path: PathBuf,
    pub log_level: String,
    /// Insert the initial posts when the database starts empty
    pub seed: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Self::from_sources(
            File::with_name(CONFIG_FILE_STEM).required(false),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn from_sources(file: ConfigFile, env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("database_path", "blog.db")?
            .set_default("index_path", "index.html")?
            .set_default("log_level", "info")?
            .set_default("seed", true)?
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
