use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::passwords;

pub struct ChangePassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ChangePassword<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        if new_password.chars().count() < 8 {
            return Err(ApiError::validation(
                "Passwords must be at least 8 characters long!",
            ));
        }
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        if !passwords::verify(user.password_hash.as_deref(), old_password) {
            return Err(ApiError::validation("Incorrect old password."));
        }
        let hash = passwords::hash(new_password)?;
        self.repo.set_password_hash(user_id, &hash).await?;
        Ok(())
    }
}
