use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::category_repository::CategoryRow;
use crate::application::ports::comment_repository::CommentRow;
use crate::application::ports::tag_repository::TagRow;

#[derive(Debug, Clone)]
pub struct ArticleRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub category: Option<CategoryRow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContentRow {
    pub id: Uuid,
    pub article_id: Uuid,
    pub language: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct NewContent {
    pub language: String,
    pub title: String,
    pub body: String,
}

/// Article aggregate as the API serializes it: the row plus its per-language
/// contents, tag set and comments.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub article: ArticleRow,
    pub contents: Vec<ContentRow>,
    pub tags: Vec<TagRow>,
    pub comments: Vec<CommentRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArticleOrder {
    #[default]
    Created,
    Updated,
}

/// Listing filters compose: category name, tag name, keyword. Keyword matches
/// case-insensitively against any language's title or body.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub keyword: Option<String>,
    pub order: ArticleOrder,
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Inserts the article together with its content blocks and tag links in
    /// one transaction.
    async fn create(
        &self,
        author_id: Uuid,
        category_id: Option<Uuid>,
        contents: &[NewContent],
        tag_ids: &[Uuid],
    ) -> anyhow::Result<ArticleRecord>;
    async fn list(&self, filter: &ArticleFilter) -> anyhow::Result<Vec<ArticleRecord>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<ArticleRecord>>;
    /// `category_id`: outer `None` leaves the category untouched, `Some(None)`
    /// clears it. `tag_ids: Some(..)` replaces the whole tag set.
    async fn update(
        &self,
        id: Uuid,
        category_id: Option<Option<Uuid>>,
        tag_ids: Option<&[Uuid]>,
    ) -> anyhow::Result<Option<ArticleRecord>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn list_contents(&self) -> anyhow::Result<Vec<ContentRow>>;
    async fn add_content(&self, article_id: Uuid, content: &NewContent)
    -> anyhow::Result<ContentRow>;
    async fn find_content(&self, id: Uuid) -> anyhow::Result<Option<ContentRow>>;
    async fn update_content(
        &self,
        id: Uuid,
        language: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Option<ContentRow>>;
    async fn delete_content(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn content_language_exists(
        &self,
        article_id: Uuid,
        language: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<bool>;
}
