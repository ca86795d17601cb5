use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::token_blacklist::TokenBlacklist;

pub struct Logout<'a, B: TokenBlacklist + ?Sized> {
    pub blacklist: &'a B,
}

impl<'a, B: TokenBlacklist + ?Sized> Logout<'a, B> {
    pub async fn execute(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), ApiError> {
        if self.blacklist.is_revoked(jti).await? {
            return Err(ApiError::validation("Token is blacklisted"));
        }
        self.blacklist.revoke(jti, expires_at).await?;
        Ok(())
    }
}
