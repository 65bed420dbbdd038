use async_trait::async_trait;
use sqlx::PgPool;

use super::TeacherDirectory;
use crate::models::teacher::Teacher;

#[derive(Clone)]
pub struct PgTeacherDirectory {
    pool: PgPool,
}

impl PgTeacherDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a teacher unless the username is already taken. Returns whether a row was added.
    pub async fn register(&self, username: &str, display_name: Option<&str>) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT INTO teachers (username, display_name) VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(display_name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Teacher>> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name, created_at FROM teachers ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(teachers)
    }
}

#[async_trait]
impl TeacherDirectory for PgTeacherDirectory {
    async fn exists(&self, username: &str) -> anyhow::Result<bool> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM teachers WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}
