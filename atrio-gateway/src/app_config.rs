use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout(),
        }
    }

    /// Layered load: optional `config/gateway` file, then `ATRIO_GATEWAY_*`
    /// environment overrides (e.g. `ATRIO_GATEWAY_BASE_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name("config/gateway").required(false))
            .add_source(config::Environment::with_prefix("ATRIO_GATEWAY"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_defaults_when_absent() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8080"}"#).unwrap();
        assert_eq!(config.timeout_seconds, 30);
    }
}
