//! Spider API calls are made up the following components:
//! 1. HTTP (`Template::fetch_data`)
//!     a) client
//!     b) request
//!     c) deserializer
//!
//! 2. transformation (`Template::build_task`), one `SampleTask` per record, keyed by
//!    `Template::uid`
//!
//! 3. storage (`send_data`), an upsert per task against a `TaskStore`
//!
//! Fetching and sending are separate values: `fetch_data` returns the records, and `send_data`
//! takes them as an argument. `TemplateClient` keeps the last fetch around for callers that
//! drive the two phases separately.
use crate::store::TaskStore;
use crate::task::{SampleTask, SyncFailure, SyncReport};
use crate::tui::SyncProgress;
use crate::SpiderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::{stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// A calendar source whose records become sample tasks.
#[async_trait]
pub trait Template: Send + Sync {
    type Record: Serialize + Send + Sync;

    /// Metadata tag of every task this calendar produces; also the `uid` prefix.
    const METADATA: &'static str;

    /// Fetch one page of records from the remote calendar.
    async fn fetch_data(&self) -> Result<Vec<Self::Record>, SpiderError>;

    /// The natural key of a record, e.g. a ticker.
    fn key(record: &Self::Record) -> &str;

    fn build_task(
        record: &Self::Record,
        uid: String,
        raw: String,
        now: DateTime<Utc>,
    ) -> SampleTask;

    fn uid(record: &Self::Record) -> String {
        format!("{}_{}", Self::METADATA, Self::key(record))
    }
}

/// Upsert every record of `T` into `store`, sorting the returned ids into created and modified.
pub async fn send_data<T: Template>(store: &dyn TaskStore, records: &[T::Record]) -> SyncReport {
    send_data_with::<T>(store, records, &SyncProgress::hidden()).await
}

/// [`send_data`], reporting each record to `progress`.
///
/// A record that fails to serialize or to upsert is logged and listed in
/// [`SyncReport::failed`]; ids that are not positive are dropped.
pub async fn send_data_with<T: Template>(
    store: &dyn TaskStore,
    records: &[T::Record],
    progress: &SyncProgress,
) -> SyncReport {
    let time = std::time::Instant::now();
    let now = Utc::now();
    let mut report = SyncReport::default();

    let mut stream = stream::iter(records);
    while let Some(record) = stream.next().await {
        let uid = T::uid(record);

        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(err) => {
                error!("failed to serialize [{uid}], error({err})");
                progress.fail();
                report.failed.push(SyncFailure {
                    uid,
                    reason: SpiderError::from(err).to_string(),
                });
                continue;
            }
        };

        let task = T::build_task(record, uid, raw, now);
        match store.upsert(&task).await {
            Ok((id, true)) if id > 0 => {
                trace!("created [{}] as {id}", task.uid);
                report.created.push(id);
                progress.success();
            }
            Ok((id, false)) if id > 0 => {
                trace!("modified [{}] as {id}", task.uid);
                report.modified.push(id);
                progress.success();
            }
            Ok((id, _)) => {
                trace!("dropping [{}], store returned id {id}", task.uid);
                progress.skip();
            }
            Err(err) => {
                error!("failed to upsert [{}], error({err})", task.uid);
                progress.fail();
                report.failed.push(SyncFailure {
                    uid: task.uid,
                    reason: err.to_string(),
                });
            }
        }
    }
    progress.finish();

    debug!(
        "{} records sent. {}",
        T::METADATA,
        crate::time_elapsed(time)
    );
    info!(
        "{}: {} created, {} modified, {} failed",
        T::METADATA,
        report.created.len(),
        report.modified.len(),
        report.failed.len()
    );

    report
}

/// A calendar paired with its store, holding the last successful fetch.
pub struct TemplateClient<T: Template> {
    template: T,
    store: Arc<dyn TaskStore>,
    data: Option<Vec<T::Record>>,
}

impl<T: Template> TemplateClient<T> {
    pub fn new(template: T, store: Arc<dyn TaskStore>) -> Self {
        Self {
            template,
            store,
            data: None,
        }
    }

    /// Fetch and keep the records; a failed fetch leaves the previous data untouched.
    pub async fn fetch_data(&mut self) -> Result<(), SpiderError> {
        let records = self.template.fetch_data().await?;
        debug!("{} fetched {} records", T::METADATA, records.len());
        self.data = Some(records);
        Ok(())
    }

    pub async fn send_data(&self) -> Result<SyncReport, SpiderError> {
        self.send_data_with(&SyncProgress::hidden()).await
    }

    pub async fn send_data_with(&self, progress: &SyncProgress) -> Result<SyncReport, SpiderError> {
        let records = self.data.as_deref().ok_or(SpiderError::EmptyData)?;
        Ok(send_data_with::<T>(self.store.as_ref(), records, progress).await)
    }

    pub fn data(&self) -> Option<&[T::Record]> {
        self.data.as_deref()
    }

    pub fn take_data(&mut self) -> Option<Vec<T::Record>> {
        self.data.take()
    }
}
