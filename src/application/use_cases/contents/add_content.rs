use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ArticleRepository, ContentRow, NewContent};
use crate::application::use_cases::articles::create_article::validate_content;

pub struct AddContent<'a, R: ArticleRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArticleRepository + ?Sized> AddContent<'a, R> {
    pub async fn execute(
        &self,
        article_id: Uuid,
        content: &NewContent,
    ) -> Result<ContentRow, ApiError> {
        validate_content(content)?;
        if self.repo.find(article_id).await?.is_none() {
            return Err(ApiError::validation("Unknown article."));
        }
        if self
            .repo
            .content_language_exists(article_id, &content.language, None)
            .await?
        {
            return Err(ApiError::validation(
                "A content block for this language already exists.",
            ));
        }
        Ok(self.repo.add_content(article_id, content).await?)
    }
}
