use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Revocation list for refresh tokens. Entries only need to outlive the
/// token's own expiry.
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> anyhow::Result<()>;
    async fn is_revoked(&self, jti: Uuid) -> anyhow::Result<bool>;
}
