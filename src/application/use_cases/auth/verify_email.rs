use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::user_repository::UserRepository;

pub struct VerifyEmail<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> VerifyEmail<'a, R> {
    pub async fn execute(&self, token: Uuid) -> Result<(), ApiError> {
        let user = self
            .repo
            .find_by_verification_token(token)
            .await?
            .ok_or_else(|| ApiError::validation("Invalid token."))?;
        if user.is_email_verified {
            return Err(ApiError::validation("Email already verified."));
        }
        self.repo.mark_email_verified(user.id).await?;
        Ok(())
    }
}
