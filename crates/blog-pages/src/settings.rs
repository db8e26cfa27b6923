//! Page server configuration
//!
//! Built-in defaults, then an optional `blog-pages.toml`, then
//! `BLOG_PAGES_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    pub bind_address: String,
    pub log_level: String,
}

impl PagesConfig {
    pub fn load() -> Result<Self> {
        Config::builder()
            .set_default("bind_address", "127.0.0.1:5000")?
            .set_default("log_level", "info")?
            .add_source(File::with_name("blog-pages").required(false))
            .add_source(Environment::with_prefix("BLOG_PAGES"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
