use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DemoConfig {
    /// Seed a few rooms and dishes on startup for a fresh install.
    #[serde(default)]
    pub seed: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Base configuration, then the environment-specific and local
            // overlays (both optional, local stays out of git)
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // `ATRIO_SERVER__PORT=9000` style environment overrides
            .add_source(config::Environment::with_prefix("ATRIO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
