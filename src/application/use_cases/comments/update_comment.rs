use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::comment_repository::{CommentRepository, CommentRow};

pub struct UpdateComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> UpdateComment<'a, R> {
    /// Only the original author may edit.
    pub async fn execute(
        &self,
        id: Uuid,
        caller: Uuid,
        content: &str,
    ) -> Result<CommentRow, ApiError> {
        if content.trim().is_empty() {
            return Err(ApiError::validation("Comment content may not be blank."));
        }
        let comment = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Comment not found."))?;
        if comment.user_id != caller {
            return Err(ApiError::forbidden(
                "You do not have permission to perform this action.",
            ));
        }
        self.repo
            .update(id, content)
            .await?
            .ok_or_else(|| ApiError::not_found("Comment not found."))
    }
}
