use std::collections::HashSet;

use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ArticleRecord, ArticleRepository, NewContent};
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::tag_repository::TagRepository;

pub struct CreateArticle<
    'a,
    A: ArticleRepository + ?Sized,
    C: CategoryRepository + ?Sized,
    T: TagRepository + ?Sized,
> {
    pub articles: &'a A,
    pub categories: &'a C,
    pub tags: &'a T,
}

pub fn validate_content(content: &NewContent) -> Result<(), ApiError> {
    // lengths are character counts, not bytes
    let language_chars = content.language.chars().count();
    if language_chars == 0 || language_chars > 5 {
        return Err(ApiError::validation(
            "Language code must be between 1 and 5 characters long.",
        ));
    }
    let title_chars = content.title.chars().count();
    if title_chars == 0 || title_chars > 200 {
        return Err(ApiError::validation(
            "Title must be between 1 and 200 characters long.",
        ));
    }
    Ok(())
}

impl<'a, A: ArticleRepository + ?Sized, C: CategoryRepository + ?Sized, T: TagRepository + ?Sized>
    CreateArticle<'a, A, C, T>
{
    /// The article and its content blocks go in atomically; a partially
    /// created article is never observable.
    pub async fn execute(
        &self,
        author_id: Uuid,
        category_id: Option<Uuid>,
        contents: &[NewContent],
        tag_ids: &[Uuid],
    ) -> Result<ArticleRecord, ApiError> {
        if contents.is_empty() {
            return Err(ApiError::validation(
                "An article requires at least one content block.",
            ));
        }
        let mut languages = HashSet::new();
        for content in contents {
            validate_content(content)?;
            if !languages.insert(content.language.as_str()) {
                return Err(ApiError::validation(
                    "Duplicate language in article contents.",
                ));
            }
        }
        if let Some(cid) = category_id {
            if self.categories.find(cid).await?.is_none() {
                return Err(ApiError::validation("Unknown category."));
            }
        }
        for tid in tag_ids {
            if self.tags.find(*tid).await?.is_none() {
                return Err(ApiError::validation("Unknown tag."));
            }
        }
        Ok(self
            .articles
            .create(author_id, category_id, contents, tag_ids)
            .await?)
    }
}
