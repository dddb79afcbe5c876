use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use rss::Channel;

use crate::error::FeedError;

/// One syndication item. The link doubles as the dedup identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<FixedOffset>>,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            published: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.link
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches the feed and returns its entries in feed order.
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError>;
}

pub struct HttpFeedSource {
    client: Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let content = response.bytes().await?;
        parse_feed(&content)
    }
}

/// Parses an RSS document into entries, keeping document order.
///
/// Items without a link cannot be deduplicated and are dropped.
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let channel = Channel::read_from(content)?;

    let entries = channel
        .items()
        .iter()
        .filter_map(|item| {
            let Some(link) = item.link().map(str::trim).filter(|link| !link.is_empty()) else {
                tracing::warn!(title = ?item.title(), "skipping feed item without a link");
                return None;
            };

            Some(FeedEntry {
                title: item.title().unwrap_or("Untitled").to_string(),
                link: link.to_string(),
                published: item
                    .pub_date()
                    .and_then(|date| DateTime::parse_from_rfc2822(date).ok()),
            })
        })
        .collect();

    Ok(entries)
}
