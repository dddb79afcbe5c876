//! In-memory stand-ins for the store, feed and notifier seams.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use feed_relay::{
    FeedEntry, FeedError, FeedSource, Notifier, PublishError, SeenSet, SeenStore, StoreError,
};

#[derive(Default)]
pub struct MemoryStore {
    pub stored: Mutex<Option<SeenSet>>,
    pub fail_load: bool,
    pub fail_save: bool,
    pub saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn with(ids: &[&str]) -> Self {
        Self {
            stored: Mutex::new(Some(ids.iter().map(|id| id.to_string()).collect())),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<SeenSet> {
        self.stored.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl SeenStore for MemoryStore {
    async fn load(&self) -> Result<SeenSet, StoreError> {
        if self.fail_load {
            return Err(StoreError::Read("access denied".to_string()));
        }
        Ok(self.stored().unwrap_or_default())
    }

    async fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        *self.saves.lock().unwrap() += 1;
        if self.fail_save {
            return Err(StoreError::Write("bucket gone".to_string()));
        }
        *self.stored.lock().unwrap() = Some(seen.clone());
        Ok(())
    }
}

pub struct StaticFeed(pub Vec<FeedEntry>);

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        Ok(self.0.clone())
    }
}

pub struct BrokenFeed;

#[async_trait]
impl FeedSource for BrokenFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        Err(FeedError::Status(reqwest::StatusCode::BAD_GATEWAY))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub attempts: Mutex<Vec<String>>,
    pub failing: Vec<String>,
}

impl RecordingNotifier {
    pub fn failing_on(links: &[&str]) -> Self {
        Self {
            failing: links.iter().map(|link| link.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, entry: &FeedEntry) -> Result<(), PublishError> {
        self.attempts.lock().unwrap().push(entry.link.clone());
        if self.failing.contains(&entry.link) {
            return Err(PublishError::Status {
                status: reqwest::StatusCode::FORBIDDEN,
                body: "Missing Access".to_string(),
            });
        }
        Ok(())
    }
}

pub fn feed() -> StaticFeed {
    StaticFeed(vec![
        FeedEntry::new("T1", "https://a/1"),
        FeedEntry::new("T2", "https://a/2"),
    ])
}
