use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ArticleRecord, ArticleRepository};
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::tag_repository::TagRepository;

pub struct UpdateArticle<
    'a,
    A: ArticleRepository + ?Sized,
    C: CategoryRepository + ?Sized,
    T: TagRepository + ?Sized,
> {
    pub articles: &'a A,
    pub categories: &'a C,
    pub tags: &'a T,
}

impl<'a, A: ArticleRepository + ?Sized, C: CategoryRepository + ?Sized, T: TagRepository + ?Sized>
    UpdateArticle<'a, A, C, T>
{
    pub async fn execute(
        &self,
        id: Uuid,
        category_id: Option<Option<Uuid>>,
        tag_ids: Option<&[Uuid]>,
    ) -> Result<ArticleRecord, ApiError> {
        if let Some(Some(cid)) = category_id {
            if self.categories.find(cid).await?.is_none() {
                return Err(ApiError::validation("Unknown category."));
            }
        }
        if let Some(tids) = tag_ids {
            for tid in tids {
                if self.tags.find(*tid).await?.is_none() {
                    return Err(ApiError::validation("Unknown tag."));
                }
            }
        }
        self.articles
            .update(id, category_id, tag_ids)
            .await?
            .ok_or_else(|| ApiError::not_found("Article not found."))
    }
}
