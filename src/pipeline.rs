use crate::error::FeedError;
use crate::feed::FeedSource;
use crate::notifier::Notifier;
use crate::store::{SeenSet, SeenStore};

/// Outcome counters for one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: usize,
    pub skipped: usize,
    pub published: usize,
    pub failed_publishes: usize,
    pub persisted: bool,
}

/// Load, fetch, announce new entries, persist.
pub struct ReconcilePipeline<'a> {
    store: &'a dyn SeenStore,
    feed: &'a dyn FeedSource,
    notifier: &'a dyn Notifier,
}

impl<'a> ReconcilePipeline<'a> {
    pub fn new(
        store: &'a dyn SeenStore,
        feed: &'a dyn FeedSource,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            feed,
            notifier,
        }
    }

    /// Runs one reconciliation.
    ///
    /// Only a feed failure fails the run, and in that case the store is not
    /// written. Identifiers are recorded before their publish is attempted,
    /// so a failed publish is dropped rather than retried next run.
    pub async fn run(&self) -> Result<RunReport, FeedError> {
        let mut seen = match self.store.load().await {
            Ok(seen) => {
                tracing::info!(count = seen.len(), "loaded seen set");
                seen
            }
            Err(err) => {
                tracing::error!(error = %err, "could not load seen set, treating every entry as new");
                SeenSet::default()
            }
        };

        let entries = self.feed.fetch().await.inspect_err(|err| {
            tracing::error!(error = %err, "feed fetch failed, aborting run");
        })?;
        tracing::info!(count = entries.len(), "fetched feed");

        let mut report = RunReport {
            fetched: entries.len(),
            ..RunReport::default()
        };

        for entry in &entries {
            if !seen.insert(entry.identifier()) {
                report.skipped += 1;
                continue;
            }

            match self.notifier.publish(entry).await {
                Ok(()) => {
                    tracing::info!(link = %entry.link, published = ?entry.published, "announced entry");
                    report.published += 1;
                }
                Err(err) => {
                    tracing::error!(link = %entry.link, error = %err, "failed to announce entry");
                    report.failed_publishes += 1;
                }
            }
        }

        match self.store.save(&seen).await {
            Ok(()) => report.persisted = true,
            Err(err) => tracing::error!(error = %err, "could not persist seen set"),
        }

        tracing::info!(
            fetched = report.fetched,
            skipped = report.skipped,
            published = report.published,
            failed = report.failed_publishes,
            persisted = report.persisted,
            "run complete"
        );

        Ok(report)
    }
}
