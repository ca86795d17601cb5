use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ArticleRepository, ContentRow};

pub struct GetContent<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> GetContent<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<ContentRow, ApiError> {
        self.repo
            .find_content(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Article content not found."))
    }
}
