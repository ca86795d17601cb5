use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ResetTokenRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Drops every live token for the user and inserts the new one in a
    /// single transaction, so at most one token is ever authoritative.
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<ResetTokenRow>;
    async fn find_by_token(&self, token: Uuid) -> anyhow::Result<Option<ResetTokenRow>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
