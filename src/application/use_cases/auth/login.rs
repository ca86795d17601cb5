use crate::application::error::ApiError;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::application::use_cases::auth::passwords;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Failure messages deliberately distinguish unknown email, wrong
    /// password, inactive and unverified accounts.
    pub async fn execute(&self, req: &LoginRequest) -> Result<UserRow, ApiError> {
        let user = self
            .repo
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| ApiError::validation("No account found with this email."))?;
        if !passwords::verify(user.password_hash.as_deref(), &req.password) {
            return Err(ApiError::validation("Incorrect password."));
        }
        if !user.is_active {
            return Err(ApiError::validation(
                "Account is not active. Please verify your email.",
            ));
        }
        if !user.is_email_verified {
            return Err(ApiError::validation(
                "Email is not verified. Please check your email for the verification link.",
            ));
        }
        Ok(user)
    }
}
