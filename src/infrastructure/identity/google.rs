use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::identity_verifier::{IdentityVerifier, VerifiedIdentity};

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifies Google ID tokens against the tokeninfo endpoint and checks the
/// audience matches our OAuth client id.
pub struct GoogleIdentityVerifier {
    client: reqwest::Client,
    client_id: String,
}

impl GoogleIdentityVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify_id_token(&self, token: &str) -> anyhow::Result<Option<VerifiedIdentity>> {
        let resp = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", token)])
            .send()
            .await?;
        // Google answers 4xx for malformed or expired tokens
        if resp.status().is_client_error() {
            return Ok(None);
        }
        if !resp.status().is_success() {
            anyhow::bail!("tokeninfo returned {}", resp.status());
        }
        let info: TokenInfo = resp.json().await?;
        if info.aud != self.client_id {
            return Ok(None);
        }
        let Some(email) = info.email else {
            return Ok(None);
        };
        Ok(Some(VerifiedIdentity {
            email,
            name: info.name.unwrap_or_default(),
        }))
    }
}
