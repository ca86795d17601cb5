use crate::application::error::ApiError;
use crate::application::ports::identity_verifier::IdentityVerifier;
use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct GoogleLogin<'a, R: UserRepository + ?Sized, V: IdentityVerifier + ?Sized> {
    pub repo: &'a R,
    pub verifier: &'a V,
}

impl<'a, R: UserRepository + ?Sized, V: IdentityVerifier + ?Sized> GoogleLogin<'a, R, V> {
    /// Get-or-create: first federated login provisions an account that is
    /// active and verified from the start.
    pub async fn execute(&self, id_token: &str) -> Result<UserRow, ApiError> {
        let identity = self
            .verifier
            .verify_id_token(id_token)
            .await?
            .ok_or_else(|| ApiError::validation("Invalid token"))?;

        if let Some(user) = self.repo.find_by_email(&identity.email).await? {
            return Ok(user);
        }
        let username = if identity.name.is_empty() {
            identity.email.clone()
        } else {
            identity.name.clone()
        };
        let user = self
            .repo
            .create_federated_user(&username, &identity.email)
            .await?;
        Ok(user)
    }
}
