use async_trait::async_trait;

use crate::application::ports::identity_verifier::{IdentityVerifier, VerifiedIdentity};

pub mod google;

/// Used when no OAuth client id is configured; every token is rejected.
pub struct DisabledIdentityVerifier;

#[async_trait]
impl IdentityVerifier for DisabledIdentityVerifier {
    async fn verify_id_token(&self, _token: &str) -> anyhow::Result<Option<VerifiedIdentity>> {
        Ok(None)
    }
}
