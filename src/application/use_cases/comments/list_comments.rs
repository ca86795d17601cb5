use uuid::Uuid;

use crate::application::ports::comment_repository::{CommentRepository, CommentRow};

pub struct ListComments<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> ListComments<'a, R> {
    pub async fn execute(&self, article_id: Option<Uuid>) -> anyhow::Result<Vec<CommentRow>> {
        self.repo.list(article_id).await
    }
}
