use chrono::Utc;
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::passwords;

pub struct ConfirmPasswordReset<'a, U: UserRepository + ?Sized, P: PasswordResetRepository + ?Sized>
{
    pub users: &'a U,
    pub resets: &'a P,
}

impl<'a, U: UserRepository + ?Sized, P: PasswordResetRepository + ?Sized>
    ConfirmPasswordReset<'a, U, P>
{
    /// Tokens are single-use: the row is deleted once the password changes.
    pub async fn execute(&self, token: Uuid, new_password: &str) -> Result<(), ApiError> {
        if new_password.chars().count() < 8 {
            return Err(ApiError::validation(
                "Passwords must be at least 8 characters long!",
            ));
        }
        let row = self
            .resets
            .find_by_token(token)
            .await?
            .ok_or_else(|| ApiError::validation("The reset link is invalid"))?;
        if Utc::now() > row.expires_at {
            return Err(ApiError::validation("The reset link has expired"));
        }

        let hash = passwords::hash(new_password)?;
        self.users.set_password_hash(row.user_id, &hash).await?;
        self.resets.delete(row.id).await?;
        Ok(())
    }
}
