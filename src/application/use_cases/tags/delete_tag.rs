use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::tag_repository::TagRepository;

pub struct DeleteTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> DeleteTag<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Tag not found."))
        }
    }
}
