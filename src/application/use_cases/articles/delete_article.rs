use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::ArticleRepository;

pub struct DeleteArticle<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> DeleteArticle<'a, R> {
    /// Cascades to contents, comments and tag links.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Article not found."))
        }
    }
}
