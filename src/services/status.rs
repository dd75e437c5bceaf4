use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::StatusCheck;

/// Most status pings returned by `list`.
const LIST_CAP: i64 = 1000;

/// Deployment status ping log backing the frontend's health probe.
#[derive(Clone)]
pub struct StatusStore {
    pool: SqlitePool,
}

impl StatusStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records a ping from `client_name` with a fresh id and timestamp.
    pub async fn create(&self, client_name: &str) -> AppResult<StatusCheck> {
        let check = StatusCheck {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.to_string(),
            timestamp: Utc::now(),
        };

        sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES (?, ?, ?)")
            .bind(&check.id)
            .bind(&check.client_name)
            .bind(check.timestamp)
            .execute(&self.pool)
            .await?;

        Ok(check)
    }

    /// Recorded pings, capped at 1000 rows.
    pub async fn list(&self) -> AppResult<Vec<StatusCheck>> {
        let checks = sqlx::query_as::<_, StatusCheck>(
            "SELECT id, client_name, timestamp FROM status_checks LIMIT ?",
        )
        .bind(LIST_CAP)
        .fetch_all(&self.pool)
        .await?;
        Ok(checks)
    }
}
