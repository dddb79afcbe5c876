use std::env;

use crate::error::ConfigError;

pub const DEFAULT_SEEN_KEY: &str = "postedarticles.txt";
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Process-wide settings, read once at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_public_key: String,
    pub discord_token: String,
    pub discord_channel_id: String,
    pub discord_api_base: String,
    pub feed_url: String,
    pub seen_bucket: String,
    pub seen_key: String,
    pub aws_region: Option<String>,
    pub s3_endpoint_url: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenv().ok()` first if a local `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            discord_public_key: required("DISCORD_PUBLIC_KEY")?,
            discord_token: required("DISCORD_TOKEN")?,
            discord_channel_id: required("DISCORD_CHANNEL_ID")?,
            discord_api_base: optional("DISCORD_API_BASE")
                .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string()),
            feed_url: required("FEED_URL")?,
            seen_bucket: required("SEEN_BUCKET")?,
            seen_key: optional("SEEN_KEY").unwrap_or_else(|| DEFAULT_SEEN_KEY.to_string()),
            aws_region: optional("AWS_REGION"),
            s3_endpoint_url: optional("S3_ENDPOINT_URL"),
        })
    }
}
