use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<CategoryRow>>;
    async fn create(&self, name: &str) -> anyhow::Result<CategoryRow>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<CategoryRow>>;
    async fn update(&self, id: Uuid, name: &str) -> anyhow::Result<Option<CategoryRow>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
