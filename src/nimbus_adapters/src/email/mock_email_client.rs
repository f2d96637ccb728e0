use std::sync::{Arc, Mutex};

use nimbus_core::{Email, EmailClient, EmailMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Keeps every message in memory instead of delivering it. Clones share the outbox.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// Most recent message addressed to `recipient`.
    pub fn last_sent_to(&self, recipient: &str) -> Option<SentEmail> {
        self.sent()
            .into_iter()
            .rev()
            .find(|mail| mail.recipient == recipient)
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        tracing::debug!(subject = %message.subject, "mock email captured");
        self.outbox
            .lock()
            .map_err(|e| e.to_string())?
            .push(SentEmail {
                recipient: recipient.as_str().to_owned(),
                subject: message.subject.clone(),
                html_body: message.html_body.clone(),
                text_body: message.text_body.clone(),
            });
        Ok(())
    }
}
