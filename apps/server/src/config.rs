use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub discord: DiscordConfig,
}

/// Outbound Discord webhook configuration
#[derive(Debug, Clone, Default)]
pub struct DiscordConfig {
    /// Destination for incident notifications. Taken as-is, never validated
    /// against the webhook URL pattern.
    pub webhook_url: Option<String>,
    /// Outbound request timeout. `None` leaves the socket timeout to the OS.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            discord: DiscordConfig::from_env()?,
        })
    }
}

impl DiscordConfig {
    /// Load Discord configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let webhook_url = env::var("DISCORD_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let timeout = match env::var("DISCORD_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout)?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            webhook_url,
            timeout,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid number")]
    InvalidPort,

    #[error("DISCORD_TIMEOUT_SECS must be a whole number of seconds")]
    InvalidTimeout,
}
