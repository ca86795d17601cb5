use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ArticleRepository, ContentRow, NewContent};
use crate::application::use_cases::articles::create_article::validate_content;

pub struct UpdateContent<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> UpdateContent<'a, R> {
    pub async fn execute(
        &self,
        id: Uuid,
        content: &NewContent,
    ) -> Result<ContentRow, ApiError> {
        validate_content(content)?;
        let existing = self
            .repo
            .find_content(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Article content not found."))?;
        if self
            .repo
            .content_language_exists(existing.article_id, &content.language, Some(id))
            .await?
        {
            return Err(ApiError::validation(
                "A content block for this language already exists.",
            ));
        }
        self.repo
            .update_content(id, &content.language, &content.title, &content.body)
            .await?
            .ok_or_else(|| ApiError::not_found("Article content not found."))
    }
}
