use crate::application::ports::article_repository::{ArticleRepository, ContentRow};

pub struct ListContents<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> ListContents<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<ContentRow>> {
        self.repo.list_contents().await
    }
}
