use crate::application::ports::category_repository::{CategoryRepository, CategoryRow};

pub struct ListCategories<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> ListCategories<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<CategoryRow>> {
        self.repo.list().await
    }
}
