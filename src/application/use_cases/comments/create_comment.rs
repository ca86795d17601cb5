use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::ArticleRepository;
use crate::application::ports::comment_repository::{CommentRepository, CommentRow};

pub struct CreateComment<'a, C: CommentRepository + ?Sized, A: ArticleRepository + ?Sized> {
    pub comments: &'a C,
    pub articles: &'a A,
}

impl<'a, C: CommentRepository + ?Sized, A: ArticleRepository + ?Sized> CreateComment<'a, C, A> {
    pub async fn execute(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<CommentRow, ApiError> {
        if content.trim().is_empty() {
            return Err(ApiError::validation("Comment content may not be blank."));
        }
        if self.articles.find(article_id).await?.is_none() {
            return Err(ApiError::validation("Unknown article."));
        }
        Ok(self.comments.create(article_id, user_id, content).await?)
    }
}
