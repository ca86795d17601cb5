use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, is_email_verified, email_verification_token";

fn map_user(r: &sqlx::postgres::PgRow) -> UserRow {
    UserRow {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        role: r.get("role"),
        is_active: r.get("is_active"),
        is_email_verified: r.get("is_email_verified"),
        email_verification_token: r.get("email_verification_token"),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        verification_token: Uuid,
    ) -> anyhow::Result<UserRow> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO users (username, email, password_hash, role, email_verification_token)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#,
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(verification_token)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_user(&row))
    }

    async fn create_federated_user(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<UserRow> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO users (username, email, is_active, is_email_verified)
               VALUES ($1, $2, TRUE, TRUE)
               RETURNING {USER_COLUMNS}"#,
        ))
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_user(&row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(&format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_user(&r)))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(&format!(r#"SELECT {USER_COLUMNS} FROM users WHERE id = $1"#))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_user(&r)))
    }

    async fn find_by_verification_token(&self, token: Uuid) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(&format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE email_verification_token = $1"#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_user(&r)))
    }

    async fn mark_email_verified(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE users SET is_email_verified = TRUE, is_active = TRUE WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_username(&self, id: Uuid, username: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE users SET username = $2 WHERE id = $1")
            .bind(id)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
