use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Errors talking to the blob store that holds the seen set.
///
/// A missing object is not represented here: it is the first-run
/// condition and loads as an empty set.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read seen set: {0}")]
    Read(String),

    #[error("failed to write seen set: {0}")]
    Write(String),
}

/// Run-fatal feed failures.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("feed responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed feed: {0}")]
    Parse(#[from] rss::Error),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat api responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
