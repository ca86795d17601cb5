use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::application::use_cases::auth::passwords;
use crate::domain::users::Role;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub struct Register<'a, R: UserRepository + ?Sized, M: Mailer + ?Sized> {
    pub repo: &'a R,
    pub mailer: &'a M,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    pub role: Option<String>,
}

impl<'a, R: UserRepository + ?Sized, M: Mailer + ?Sized> Register<'a, R, M> {
    pub async fn execute(
        &self,
        req: &RegisterRequest,
        verify_base_url: &str,
    ) -> Result<UserRow, ApiError> {
        if !EMAIL_RE.is_match(&req.email) {
            return Err(ApiError::validation("Enter a valid email address."));
        }
        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(ApiError::validation("Email is already in use!"));
        }
        if req.password1 != req.password2 {
            return Err(ApiError::validation("Passwords do not match!"));
        }
        if req.password1.chars().count() < 8 {
            return Err(ApiError::validation(
                "Passwords must be at least 8 characters long!",
            ));
        }
        let role = match req.role.as_deref() {
            None => Role::default(),
            Some(r) => Role::parse(r).ok_or_else(|| ApiError::validation("Invalid role."))?,
        };

        let hash = passwords::hash(&req.password1)?;
        let verification_token = Uuid::new_v4();
        let user = self
            .repo
            .create_user(
                &req.username,
                &req.email,
                &hash,
                role.as_str(),
                verification_token,
            )
            .await?;

        let link = format!("{}/verifyEmail/{}/", verify_base_url, verification_token);
        self.mailer
            .send(
                &user.email,
                "Verify your email",
                &format!(
                    "Please click the following link to verify your email and activate your account: {}",
                    link
                ),
            )
            .await?;

        Ok(user)
    }
}
