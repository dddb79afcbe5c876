use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::PublishError;
use crate::feed::FeedEntry;

/// Body of a channel message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub content: String,
}

impl From<&FeedEntry> for NotificationMessage {
    fn from(entry: &FeedEntry) -> Self {
        Self {
            content: format!("New Article: {}\nLink: {}", entry.title, entry.link),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, entry: &FeedEntry) -> Result<(), PublishError>;
}

/// Posts messages to a Discord channel as a bot.
pub struct DiscordNotifier {
    client: Client,
    endpoint: String,
    token: String,
}

impl DiscordNotifier {
    pub fn new(
        client: Client,
        api_base: &str,
        channel_id: &str,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/channels/{}/messages",
                api_base.trim_end_matches('/'),
                channel_id
            ),
            token: token.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.discord_api_base,
            &config.discord_channel_id,
            &config.discord_token,
        )
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn publish(&self, entry: &FeedEntry) -> Result<(), PublishError> {
        let message = NotificationMessage::from(entry);

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Status { status, body });
        }

        Ok(())
    }
}
