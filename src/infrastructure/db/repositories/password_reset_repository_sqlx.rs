use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::password_reset_repository::{
    PasswordResetRepository, ResetTokenRow,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxPasswordResetRepository {
    pub pool: PgPool,
}

impl SqlxPasswordResetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_token(r: &sqlx::postgres::PgRow) -> ResetTokenRow {
    ResetTokenRow {
        id: r.get("id"),
        user_id: r.get("user_id"),
        token: r.get("token"),
        created_at: r.get("created_at"),
        expires_at: r.get("expires_at"),
    }
}

#[async_trait]
impl PasswordResetRepository for SqlxPasswordResetRepository {
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<ResetTokenRow> {
        // Delete-then-insert runs in one transaction so concurrent requests
        // leave exactly one authoritative token.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        let row = sqlx::query(
            r#"INSERT INTO password_reset_tokens (user_id, token, expires_at)
               VALUES ($1, $2, $3)
               RETURNING id, user_id, token, created_at, expires_at"#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(map_token(&row))
    }

    async fn find_by_token(&self, token: Uuid) -> anyhow::Result<Option<ResetTokenRow>> {
        let row = sqlx::query(
            r#"SELECT id, user_id, token, created_at, expires_at
               FROM password_reset_tokens WHERE token = $1"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_token(&r)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM password_reset_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
