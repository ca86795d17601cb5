use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub email_verification_token: Uuid,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a local-credential account: inactive and unverified until the
    /// verification token is presented.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        verification_token: Uuid,
    ) -> anyhow::Result<UserRow>;
    /// Creates an account from a federated identity: active, verified, no
    /// local password.
    async fn create_federated_user(&self, username: &str, email: &str)
    -> anyhow::Result<UserRow>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_verification_token(&self, token: Uuid) -> anyhow::Result<Option<UserRow>>;
    async fn mark_email_verified(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> anyhow::Result<bool>;
    async fn set_username(&self, id: Uuid, username: &str) -> anyhow::Result<bool>;
    async fn username_exists(&self, username: &str) -> anyhow::Result<bool>;
}
