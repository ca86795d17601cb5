use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::category_repository::CategoryRepository;

pub struct DeleteCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> DeleteCategory<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Category not found."))
        }
    }
}
