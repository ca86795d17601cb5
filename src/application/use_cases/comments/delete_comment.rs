use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::comment_repository::CommentRepository;

pub struct DeleteComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> DeleteComment<'a, R> {
    /// Only the original author may delete.
    pub async fn execute(&self, id: Uuid, caller: Uuid) -> Result<(), ApiError> {
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
        self.repo.delete(id).await?;
        Ok(())
    }
}
