use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One generated site as stored in the `sites` table. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteRow {
    pub id: Uuid,
    /// Profile with credentials stripped.
    pub profile_json: Value,
    pub content_json: Value,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}
