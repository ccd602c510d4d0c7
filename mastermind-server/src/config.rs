use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::generator::GeneratorConfig;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub path: String,
    /// Insert the demo company and its pools on startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_seed_demo_data() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 1. Optional settings.toml
        let config_file_name = "settings.toml";

        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // Development checkout
        let dev_path = PathBuf::from("mastermind-server").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        builder = with_defaults(builder)?;

        // 2. Environment variables win
        if let Ok(db_path) = std::env::var("DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Ok(seed) = std::env::var("MASTERMIND_SEED") {
            builder = builder.set_override("generator.rng_seed", seed)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

fn with_defaults(builder: Builder) -> Result<Builder, ConfigError> {
    let defaults = GeneratorConfig::default();
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.path", "mastermind.db")?
        .set_default("database.seed_demo_data", true)?
        .set_default("generator.history_window", defaults.history_window as u64)?
        .set_default("generator.recent_author_window", defaults.recent_author_window as u64)?
        .set_default("generator.min_fresh_keywords", defaults.min_fresh_keywords as u64)
}
