use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::category_repository::{CategoryRepository, CategoryRow};

pub struct GetCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> GetCategory<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<CategoryRow, ApiError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Category not found."))
    }
}
