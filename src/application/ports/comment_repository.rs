use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CommentRow {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> anyhow::Result<CommentRow>;
    async fn list(&self, article_id: Option<Uuid>) -> anyhow::Result<Vec<CommentRow>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<CommentRow>>;
    async fn update(&self, id: Uuid, content: &str) -> anyhow::Result<Option<CommentRow>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
