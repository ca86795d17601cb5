use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::application::ports::user_repository::UserRepository;

/// Reset tokens expire after one hour.
const RESET_TOKEN_TTL_SECS: i64 = 60 * 60;

pub struct RequestPasswordReset<
    'a,
    U: UserRepository + ?Sized,
    P: PasswordResetRepository + ?Sized,
    M: Mailer + ?Sized,
> {
    pub users: &'a U,
    pub resets: &'a P,
    pub mailer: &'a M,
}

impl<'a, U: UserRepository + ?Sized, P: PasswordResetRepository + ?Sized, M: Mailer + ?Sized>
    RequestPasswordReset<'a, U, P, M>
{
    pub async fn execute(&self, email: &str, reset_base_url: &str) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                ApiError::validation("No user found with this email address.")
            })?;

        let token = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
        let row = self
            .resets
            .replace_for_user(user.id, token, expires_at)
            .await?;

        let link = format!("{}/resetPassword/{}/", reset_base_url, row.token);
        self.mailer
            .send(
                &user.email,
                "Reset your password",
                &format!(
                    "Use this link to reset your password: {}\nThis link will expire in 1 hour.",
                    link
                ),
            )
            .await?;
        Ok(())
    }
}
