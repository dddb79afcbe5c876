//! Relays new RSS entries to a Discord channel, remembering what was
//! already announced in an S3 object, and answers Discord's webhook ping.

pub mod config;
pub mod error;
pub mod feed;
pub mod handshake;
pub mod invocation;
pub mod lambda;
pub mod logging;
pub mod notifier;
pub mod pipeline;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, FeedError, PublishError, StoreError};
pub use feed::{FeedEntry, FeedSource, HttpFeedSource};
pub use handshake::{HandshakeVerifier, VerificationRequest, WebhookResponse};
pub use invocation::Invocation;
pub use notifier::{DiscordNotifier, NotificationMessage, Notifier};
pub use pipeline::{ReconcilePipeline, RunReport};
pub use store::{S3SeenStore, SeenSet, SeenStore};
