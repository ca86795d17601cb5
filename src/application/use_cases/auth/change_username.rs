use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::passwords;

pub struct ChangeUsername<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ChangeUsername<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        new_username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let username_chars = new_username.chars().count();
        if username_chars < 3 || username_chars > 150 {
            return Err(ApiError::validation(
                "Username must be between 3 and 150 characters long.",
            ));
        }
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        if !passwords::verify(user.password_hash.as_deref(), password) {
            return Err(ApiError::validation("Incorrect password."));
        }
        if self.repo.username_exists(new_username).await? {
            return Err(ApiError::validation("This username is already taken."));
        }
        self.repo.set_username(user_id, new_username).await?;
        Ok(())
    }
}
