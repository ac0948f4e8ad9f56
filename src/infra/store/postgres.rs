//! Postgres-backed interview store.
//!
//! Interviews inherit their time limit from the quiz they were issued for,
//! so reads join `interviews` with `quizzes`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::{NoTls, Row};

use crate::core::{ExpiryError, InterviewId, InterviewRecord, InterviewStatus, InterviewStore};

const FIND_STATUS_SQL: &str = r"
SELECT i.id, i.status, i.started_at, i.completed_at, q.time_limit
FROM interviews i
LEFT JOIN quizzes q ON q.id = i.quiz_id
WHERE i.id = $1
";

const SET_STATUS_SQL: &str = r"
UPDATE interviews SET status = $2, updated_at = NOW() WHERE id = $1
";

const CANCEL_IF_IN_PROGRESS_SQL: &str = r"
UPDATE interviews
SET status = 'cancelled', updated_at = NOW()
WHERE id = $1 AND status = 'in_progress' AND completed_at IS NULL
";

/// Interview store over a deadpool-managed Postgres connection pool.
#[derive(Clone)]
pub struct PostgresInterviewStore {
    pool: Pool,
}

impl PostgresInterviewStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Build a pool for `database_url` holding at most `max_size` connections.
    ///
    /// Connections are opened lazily on first use.
    ///
    /// # Errors
    ///
    /// `Persistence` if the pool configuration is rejected.
    pub fn connect(database_url: &str, max_size: usize) -> Result<Self, ExpiryError> {
        let mut cfg = Config::new();
        cfg.url = Some(database_url.to_owned());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig::new(max_size));
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ExpiryError::persistence("pool creation failed", e))?;
        tracing::info!(max_size, "postgres interview store configured");
        Ok(Self { pool })
    }

    /// Migration statements for the tables this store reads and writes.
    #[must_use]
    pub const fn migrations() -> &'static [&'static str] {
        &[r"
CREATE TABLE IF NOT EXISTS quizzes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    time_limit INTEGER,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE TABLE IF NOT EXISTS interviews (
    id TEXT PRIMARY KEY,
    quiz_id TEXT REFERENCES quizzes (id),
    status TEXT NOT NULL DEFAULT 'pending',
    started_at TIMESTAMPTZ,
    completed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_interviews_status ON interviews (status);
"]
    }

    /// Apply [`Self::migrations`].
    ///
    /// # Errors
    ///
    /// `Persistence` if a connection cannot be obtained or a statement fails.
    pub async fn run_migrations(&self) -> Result<(), ExpiryError> {
        let client = self.client().await?;
        for statement in Self::migrations() {
            client
                .batch_execute(statement)
                .await
                .map_err(|e| ExpiryError::persistence("migration failed", e))?;
        }
        Ok(())
    }

    async fn client(&self) -> Result<deadpool_postgres::Client, ExpiryError> {
        self.pool
            .get()
            .await
            .map_err(|e| ExpiryError::persistence("connection unavailable", e))
    }
}

fn record_from_row(row: &Row) -> Result<InterviewRecord, ExpiryError> {
    let column = |e: tokio_postgres::Error| ExpiryError::persistence("malformed interview row", e);
    let id: String = row.try_get("id").map_err(column)?;
    let status: String = row.try_get("status").map_err(column)?;
    let started_at: Option<DateTime<Utc>> = row.try_get("started_at").map_err(column)?;
    let completed_at: Option<DateTime<Utc>> = row.try_get("completed_at").map_err(column)?;
    let time_limit_minutes: Option<i32> = row.try_get("time_limit").map_err(column)?;
    Ok(InterviewRecord {
        id: InterviewId::new(id),
        status: status.parse()?,
        started_at,
        completed_at,
        time_limit_minutes,
    })
}

#[async_trait]
impl InterviewStore for PostgresInterviewStore {
    async fn find_status(
        &self,
        id: &InterviewId,
    ) -> Result<Option<InterviewRecord>, ExpiryError> {
        let client = self.client().await?;
        let row = client
            .query_opt(FIND_STATUS_SQL, &[&id.as_str()])
            .await
            .map_err(|e| ExpiryError::persistence("interview lookup failed", e))?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn set_status(
        &self,
        id: &InterviewId,
        status: InterviewStatus,
    ) -> Result<(), ExpiryError> {
        let client = self.client().await?;
        let updated = client
            .execute(SET_STATUS_SQL, &[&id.as_str(), &status.as_str()])
            .await
            .map_err(|e| ExpiryError::persistence("status update failed", e))?;
        if updated == 0 {
            return Err(ExpiryError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn cancel_if_in_progress(&self, id: &InterviewId) -> Result<bool, ExpiryError> {
        let client = self.client().await?;
        let updated = client
            .execute(CANCEL_IF_IN_PROGRESS_SQL, &[&id.as_str()])
            .await
            .map_err(|e| ExpiryError::persistence("conditional cancel failed", e))?;
        Ok(updated > 0)
    }
}
