use crate::sql;
use crate::task::SampleTask;
use crate::SpiderError;
use async_trait::async_trait;
use deadpool_postgres::{ManagerConfig, Pool, RecyclingMethod, Runtime};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, error, trace};

/// Persistence collaborator of the synchronizer.
///
/// `upsert` returns the entity id and whether the record was newly created. Implementations
/// must treat `uid` as the only unique key.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn upsert(&self, task: &SampleTask) -> Result<(i64, bool), SpiderError>;
}

// postgres
// ----------------------------------------------------------------------------

/// `journal.sample_tasks` behind a deadpool connection pool.
pub struct PgTaskStore {
    pool: Pool,
}

impl PgTaskStore {
    /// Create a pool for `url`; no connection is opened until the first query.
    pub fn connect(url: &str) -> Result<Self, SpiderError> {
        trace!("creating postgres connection pool config");
        let mut pg_config = deadpool_postgres::Config::new();
        pg_config.url = Some(url.to_string());
        pg_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|err| {
                error!("failed to create journal connection pool, error({err})");
                err
            })?;
        debug!("journal connection pool established");

        Ok(Self { pool })
    }

    /// Create the `journal` schema and the `sample_tasks` table if they are missing.
    pub async fn ensure_schema(&self) -> Result<(), SpiderError> {
        let pg_client = self.pool.get().await?;
        pg_client
            .batch_execute(sql::CREATE_SAMPLE_TASKS)
            .await
            .map_err(|err| {
                error!("failed to create journal.sample_tasks, error({err})");
                err
            })?;
        debug!("journal.sample_tasks ready");
        Ok(())
    }

    pub async fn get(&self, uid: &str) -> Result<Option<(i64, SampleTask)>, SpiderError> {
        let pg_client = self.pool.get().await?;
        let row = pg_client.query_opt(sql::SELECT_SAMPLE_TASK, &[&uid]).await?;
        Ok(row.map(|row| (row.get("id"), task_from_row(&row))))
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn upsert(&self, task: &SampleTask) -> Result<(i64, bool), SpiderError> {
        let pg_client = self.pool.get().await?;
        let query = pg_client.prepare_cached(sql::UPSERT_SAMPLE_TASK).await?;
        let row = pg_client
            .query_one(
                &query,
                &[
                    &task.created_at,
                    &task.updated_at,
                    &task.metadata,
                    &task.raw,
                    &task.name,
                    &task.uid,
                    &task.available_before,
                    &task.due_date,
                    &task.due_time,
                    &task.pending,
                    &task.refreshable,
                    &task.time_zone,
                ],
            )
            .await?;

        Ok((row.get(0), row.get(1)))
    }
}

fn task_from_row(row: &Row) -> SampleTask {
    SampleTask {
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        metadata: row.get("metadata"),
        raw: row.get("raw"),
        name: row.get("name"),
        uid: row.get("uid"),
        available_before: row.get("available_before"),
        due_date: row.get("due_date"),
        due_time: row.get("due_time"),
        pending: row.get("pending"),
        refreshable: row.get("refreshable"),
        time_zone: row.get("time_zone"),
    }
}

// memory
// ----------------------------------------------------------------------------

/// In-process store keyed by `uid`, handing out ids from 1. Backs `--dry-run`.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    last_id: i64,
    tasks: HashMap<String, (i64, SampleTask)>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, uid: &str) -> Option<(i64, SampleTask)> {
        self.inner.lock().await.tasks.get(uid).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn upsert(&self, task: &SampleTask) -> Result<(i64, bool), SpiderError> {
        let mut inner = self.inner.lock().await;

        if let Some((id, stored)) = inner.tasks.get_mut(&task.uid) {
            let created_at = stored.created_at;
            *stored = task.clone();
            stored.created_at = created_at;
            return Ok((*id, false));
        }

        inner.last_id += 1;
        let id = inner.last_id;
        inner.tasks.insert(task.uid.clone(), (id, task.clone()));
        Ok((id, true))
    }
}
