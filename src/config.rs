use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::Error;

fn default_token_file() -> PathBuf {
    PathBuf::from("tokens.json")
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8888))
}

fn default_poll_interval() -> u64 {
    10
}

fn default_refresh_interval() -> u64 {
    45 * 60
}

fn default_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_accounts_url() -> String {
    "https://accounts.spotify.com".to_string()
}

/// Service settings read from the environment once at startup.
///
/// The Spotify credentials and the webhook url are not validated; when they are
/// missing they are empty and the first request that needs them fails.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spotify_client_id: String,
    #[serde(default)]
    pub spotify_client_secret: String,
    #[serde(default)]
    pub spotify_redirect_uri: String,
    #[serde(default)]
    pub discord_webhook_url: String,

    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    /// Seconds between poll cycles
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    /// Seconds between token refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    #[serde(default = "default_api_url")]
    pub spotify_api_url: String,
    #[serde(default = "default_accounts_url")]
    pub spotify_accounts_url: String,
}

impl Config {
    /// Load the configuration from the process environment, reading a `.env` file
    /// first if one exists.
    pub fn from_env() -> Result<Self, Error> {
        if let Err(err) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {err}");
        }
        Ok(envy::from_env::<Config>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.max(1))
    }
}
