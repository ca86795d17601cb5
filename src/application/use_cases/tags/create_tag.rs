use crate::application::error::ApiError;
use crate::application::ports::tag_repository::{TagRepository, TagRow};

pub struct CreateTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> CreateTag<'a, R> {
    pub async fn execute(&self, name: &str) -> Result<TagRow, ApiError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 50 {
            return Err(ApiError::validation(
                "Tag name must be between 1 and 50 characters long.",
            ));
        }
        Ok(self.repo.create(name).await?)
    }
}
