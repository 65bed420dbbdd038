use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `teachers` table. Only the seeding tool writes it; the API
/// reads it for membership checks.
#[derive(Debug, Clone, FromRow)]
pub struct Teacher {
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
