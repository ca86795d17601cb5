use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::tag_repository::{TagRepository, TagRow};

pub struct UpdateTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> UpdateTag<'a, R> {
    pub async fn execute(&self, id: Uuid, name: &str) -> Result<TagRow, ApiError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 50 {
            return Err(ApiError::validation(
                "Tag name must be between 1 and 50 characters long.",
            ));
        }
        self.repo
            .update(id, name)
            .await?
            .ok_or_else(|| ApiError::not_found("Tag not found."))
    }
}
