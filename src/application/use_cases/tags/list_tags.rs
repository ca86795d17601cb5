use crate::application::ports::tag_repository::{TagRepository, TagRow};

pub struct ListTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ListTags<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<TagRow>> {
        self.repo.list().await
    }
}
