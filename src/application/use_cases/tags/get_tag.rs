use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::tag_repository::{TagRepository, TagRow};

pub struct GetTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> GetTag<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<TagRow, ApiError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Tag not found."))
    }
}
