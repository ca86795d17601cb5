use crate::application::ports::article_repository::{
    ArticleFilter, ArticleRecord, ArticleRepository,
};

pub struct ListArticles<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> ListArticles<'a, R> {
    pub async fn execute(&self, filter: &ArticleFilter) -> anyhow::Result<Vec<ArticleRecord>> {
        self.repo.list(filter).await
    }
}
