use crate::application::error::ApiError;
use crate::application::ports::category_repository::{CategoryRepository, CategoryRow};

pub struct CreateCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> CreateCategory<'a, R> {
    pub async fn execute(&self, name: &str) -> Result<CategoryRow, ApiError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 100 {
            return Err(ApiError::validation(
                "Category name must be between 1 and 100 characters long.",
            ));
        }
        Ok(self.repo.create(name).await?)
    }
}
