use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::category_repository::{CategoryRepository, CategoryRow};

pub struct UpdateCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> UpdateCategory<'a, R> {
    pub async fn execute(&self, id: Uuid, name: &str) -> Result<CategoryRow, ApiError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 100 {
            return Err(ApiError::validation(
                "Category name must be between 1 and 100 characters long.",
            ));
        }
        self.repo
            .update(id, name)
            .await?
            .ok_or_else(|| ApiError::not_found("Category not found."))
    }
}
