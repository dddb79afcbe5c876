use std::collections::BTreeSet;

use async_trait::async_trait;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::Config;
use crate::error::StoreError;

/// Identifiers of entries that have already been announced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    ids: BTreeSet<String>,
}

impl SeenSet {
    /// Parses the stored newline-joined form. Blank lines are ignored.
    pub fn from_text(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Like [`SeenSet::from_text`], replacing invalid UTF-8 instead of
    /// failing so readable identifiers survive a damaged object.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    /// Newline-joined identifiers, sorted.
    pub fn to_text(&self) -> String {
        self.ids.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if the identifier was not present yet.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Durable home of the [`SeenSet`] between runs.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Loads the persisted set. A store with no object yet yields an empty set.
    async fn load(&self) -> Result<SeenSet, StoreError>;

    /// Replaces the persisted set wholesale.
    async fn save(&self, seen: &SeenSet) -> Result<(), StoreError>;
}

/// Seen set kept as a plain-text object in S3.
#[derive(Debug, Clone)]
pub struct S3SeenStore {
    client: Client,
    bucket: String,
    key: String,
}

impl S3SeenStore {
    pub fn new(client: Client, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Builds the S3 client from the ambient AWS configuration, with the
    /// region and endpoint overrides from `config`. Retries are disabled.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .retry_config(RetryConfig::disabled());
        if let Some(region) = &config.aws_region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.s3_endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::new(
            Client::from_conf(builder.build()),
            &config.seen_bucket,
            &config.seen_key,
        )
    }
}

#[async_trait]
impl SeenStore for S3SeenStore {
    async fn load(&self) -> Result<SeenSet, StoreError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    tracing::info!(bucket = %self.bucket, key = %self.key, "no seen set stored yet");
                    return Ok(SeenSet::default());
                }
                return Err(StoreError::Read(
                    aws_sdk_s3::error::DisplayErrorContext(&err).to_string(),
                ));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| StoreError::Read(err.to_string()))?
            .into_bytes();
        Ok(SeenSet::from_bytes(&bytes))
    }

    async fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .content_type("text/plain")
            .body(ByteStream::from(seen.to_text().into_bytes()))
            .send()
            .await
            .map_err(|err| StoreError::Write(aws_sdk_s3::error::DisplayErrorContext(&err).to_string()))?;

        tracing::debug!(bucket = %self.bucket, key = %self.key, count = seen.len(), "seen set written");
        Ok(())
    }
}
