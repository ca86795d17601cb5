use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::comment_repository::{CommentRepository, CommentRow};

pub struct GetComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> GetComment<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<CommentRow, ApiError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Comment not found."))
    }
}
