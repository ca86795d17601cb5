use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::ArticleRepository;

pub struct DeleteContent<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> DeleteContent<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete_content(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Article content not found."))
        }
    }
}
