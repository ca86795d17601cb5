use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
}

/// Third-party identity-token verification. `Ok(None)` means the token was
/// rejected by the provider; `Err` means the verification call itself failed.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify_id_token(&self, token: &str) -> anyhow::Result<Option<VerifiedIdentity>>;
}
