use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A deployment status ping recorded by the frontend's health probe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}
