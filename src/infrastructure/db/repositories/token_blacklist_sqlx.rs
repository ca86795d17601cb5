use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::token_blacklist::TokenBlacklist;
use crate::infrastructure::db::PgPool;

pub struct SqlxTokenBlacklist {
    pub pool: PgPool,
}

impl SqlxTokenBlacklist {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenBlacklist for SqlxTokenBlacklist {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO revoked_refresh_tokens (jti, expires_at)
               VALUES ($1, $2)
               ON CONFLICT (jti) DO NOTHING"#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_refresh_tokens WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
