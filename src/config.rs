use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Steam Web API key
    #[serde(default)]
    pub steam_api_key: String,

    /// Account to compare against, as a numeric id or a vanity name
    #[serde(default)]
    pub steam_account: String,

    /// Steam Web API base URL
    #[serde(default = "default_steam_api_url")]
    pub steam_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request upstream timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on simultaneous library fetches
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Serve the built-in fixture data instead of calling Steam
    #[serde(default)]
    pub demo_mode: bool,
}

fn default_steam_api_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_fetches() -> usize {
    16
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_concurrent_fetches == 0 {
            anyhow::bail!("MAX_CONCURRENT_FETCHES must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }

        if self.demo_mode {
            return Ok(());
        }

        if self.steam_api_key.trim().is_empty() {
            anyhow::bail!("STEAM_API_KEY must be set unless DEMO_MODE is enabled");
        }
        if self.steam_account.trim().is_empty() {
            anyhow::bail!("STEAM_ACCOUNT must be set unless DEMO_MODE is enabled");
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        envy::from_iter(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DEMO_MODE", "true")]);
        assert_eq!(config.steam_api_url, "https://api.steampowered.com");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_concurrent_fetches, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_rejected_outside_demo_mode() {
        let config = config_from(&[("STEAM_ACCOUNT", "gabelogannewell")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = config_from(&[
            ("STEAM_API_KEY", "key"),
            ("STEAM_ACCOUNT", "76561197960287930"),
            ("MAX_CONCURRENT_FETCHES", "0"),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = config_from(&[("DEMO_MODE", "true"), ("REQUEST_TIMEOUT_SECS", "0")]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));

        let config = config_from(&[("DEMO_MODE", "true"), ("REQUEST_TIMEOUT_SECS", "1")]);
        assert!(config.validate().is_ok());
    }
}
