use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ArticleRecord, ArticleRepository};

pub struct GetArticle<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> GetArticle<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<ArticleRecord, ApiError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Article not found."))
    }
}
