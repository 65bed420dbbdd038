pub mod announcements;
pub mod memory;
pub mod teachers;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::announcement::{Announcement, AnnouncementPatch, NewAnnouncement};

pub use announcements::PgAnnouncementStore;
pub use memory::MemoryStore;
pub use teachers::PgTeacherDirectory;

/// Result of a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(Announcement),
    NotFound,
    /// The new expiration falls on or before the stored start date.
    ExpirationBeforeStart,
}

/// Persistence for announcements. One call per business operation.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Announcements whose display window contains `now`.
    async fn list_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>>;

    /// Every announcement, newest `created_at` first.
    async fn list_all(&self) -> anyhow::Result<Vec<Announcement>>;

    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement>;

    /// Applies the patch unless it would move the expiration on or before
    /// the stored start date (see `AnnouncementPatch::expiration_precedes_stored_start`).
    async fn update(&self, id: Uuid, patch: &AnnouncementPatch) -> anyhow::Result<UpdateOutcome>;

    /// Returns `false` when no announcement has this id.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn ping(&self) -> anyhow::Result<()>;
}

/// Membership check used to authorize actors. Swappable for a real
/// credential check without touching the service.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    async fn exists(&self, username: &str) -> anyhow::Result<bool>;
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
