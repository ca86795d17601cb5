use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::mailer::Mailer;

/// Sends mail through an HTTP relay API (single JSON POST per message).
pub struct HttpRelayMailer {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    from: String,
}

impl HttpRelayMailer {
    pub fn new(api_url: String, api_token: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_token,
            from,
        }
    }
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let mut req = self.client.post(&self.api_url).json(&RelayMessage {
            from: &self.from,
            to,
            subject,
            text: body,
        });
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("mail relay returned {}", resp.status());
        }
        Ok(())
    }
}

/// Development fallback when no relay is configured: the message only goes
/// to the log.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(%to, %subject, %body, "outbound_email");
        Ok(())
    }
}
