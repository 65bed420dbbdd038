use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AnnouncementStore, UpdateOutcome};
use crate::models::announcement::{Announcement, AnnouncementPatch, NewAnnouncement};

const COLUMNS: &str = "id, message, start_date, expiration_date, created_by, created_at";

/// Row of the guarded update: `found` tells a refused update apart from a
/// missing id; the other columns are NULL unless the update went through.
#[derive(sqlx::FromRow)]
struct GuardedUpdateRow {
    found: bool,
    id: Option<Uuid>,
    message: Option<String>,
    start_date: Option<DateTime<Utc>>,
    expiration_date: Option<DateTime<Utc>>,
    created_by: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl GuardedUpdateRow {
    fn into_outcome(self) -> UpdateOutcome {
        match (self.id, self.message, self.expiration_date, self.created_by, self.created_at) {
            (Some(id), Some(message), Some(expiration_date), Some(created_by), Some(created_at)) => {
                UpdateOutcome::Updated(Announcement {
                    id,
                    message,
                    start_date: self.start_date,
                    expiration_date,
                    created_by,
                    created_at,
                })
            }
            _ if self.found => UpdateOutcome::ExpirationBeforeStart,
            _ => UpdateOutcome::NotFound,
        }
    }
}

#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete announcements that expired before `cutoff`. Returns the number removed.
    pub async fn purge_expired_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM announcements WHERE expiration_date < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn list_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE expiration_date >= $1
               AND (start_date IS NULL OR start_date <= $1)
             ORDER BY expiration_date"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {COLUMNS} FROM announcements ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement> {
        let row = sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements (message, start_date, expiration_date, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.message)
        .bind(new.start_date)
        .bind(new.expiration_date)
        .bind(&new.created_by)
        .bind(new.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: &AnnouncementPatch) -> anyhow::Result<UpdateOutcome> {
        // $2 clears the start date. The guard only applies when the expiration
        // changes without a start date in the same patch.
        let row = sqlx::query_as::<_, GuardedUpdateRow>(&format!(
            "WITH target AS (
                 SELECT id FROM announcements WHERE id = $5
             ), updated AS (
                 UPDATE announcements
                 SET message = COALESCE($1, message),
                     start_date = CASE WHEN $2 THEN NULL ELSE COALESCE($3, start_date) END,
                     expiration_date = COALESCE($4, expiration_date)
                 WHERE id = $5
                   AND ($4::timestamptz IS NULL
                        OR $2
                        OR $3::timestamptz IS NOT NULL
                        OR start_date IS NULL
                        OR start_date < $4)
                 RETURNING {COLUMNS}
             )
             SELECT EXISTS (SELECT 1 FROM target) AS found, updated.*
             FROM (SELECT 1) AS one
             LEFT JOIN updated ON TRUE"
        ))
        .bind(&patch.message)
        .bind(patch.clears_start())
        .bind(patch.start_date.flatten())
        .bind(patch.expiration_date)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_outcome())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
