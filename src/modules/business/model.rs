use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Minimal business record; the ownership anchor role creation checks
/// against.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}
