use async_trait::async_trait;

/// Outbound notification channel. Fire-and-forget: a failed send surfaces as
/// an error to the caller, there are no retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}
