// src/config.rs
//
// Runtime settings sourced from the environment (with .env support).
// The poll interval and the post-sale delay are policy values, not
// constants; they default to the values below when unset.

use std::env;
use std::time::Duration;

use url::Url;

use crate::Error;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_SALE_DELAY_SECS: u64 = 2;

#[derive(Debug, Clone)]
pub struct GiftBotConfig {
    /// Base URL of the MTProto bridge the gift client talks to.
    pub bridge_url: String,
    /// Bearer token identifying the account session on the bridge.
    pub session_token: String,
    /// How long the auto monitor waits between sell passes.
    pub poll_interval: Duration,
    /// Pause after each successful conversion before touching the next gift.
    pub sale_delay: Duration,
}

impl GiftBotConfig {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let bridge_url = env::var("GIFTBOT_BRIDGE_URL")
            .map_err(|_| Error::Auth("GIFTBOT_BRIDGE_URL is not set".to_string()))?;
        Url::parse(&bridge_url)
            .map_err(|e| Error::Parse(format!("invalid GIFTBOT_BRIDGE_URL: {}", e)))?;

        let session_token = env::var("GIFTBOT_SESSION_TOKEN")
            .map_err(|_| Error::Auth("GIFTBOT_SESSION_TOKEN is not set".to_string()))?;

        let poll_interval = Duration::from_secs(secs_from_env(
            "GIFTBOT_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let sale_delay = Duration::from_secs(secs_from_env(
            "GIFTBOT_SALE_DELAY_SECS",
            DEFAULT_SALE_DELAY_SECS,
        )?);

        Ok(Self {
            bridge_url,
            session_token,
            poll_interval,
            sale_delay,
        })
    }
}

fn secs_from_env(key: &str, default: u64) -> Result<u64, Error> {
    match env::var(key) {
        Ok(raw) => parse_secs(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, Error> {
    raw.trim().parse::<u64>().map_err(|_| {
        Error::Parse(format!(
            "{} must be a whole number of seconds, got '{}'",
            key, raw
        ))
    })
}
