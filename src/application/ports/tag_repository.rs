use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TagRow {
    pub id: Uuid,
    pub name: String,
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<TagRow>>;
    async fn create(&self, name: &str) -> anyhow::Result<TagRow>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<TagRow>>;
    async fn update(&self, id: Uuid, name: &str) -> anyhow::Result<Option<TagRow>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
