//! Mock Email Service Implementation
//!
//! Captures messages in memory for tests and local development.
//! Can be switched into a failing mode to exercise provider outages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailConfig, EmailError, EmailMessage, EmailReceipt, EmailService};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    failing: Arc<AtomicBool>,
    default_from: String,
    contact_recipient: String,
    site_name: String,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
            default_from: "website@example.com".to_string(),
            contact_recipient: "studio@example.com".to_string(),
            site_name: "Tatjana Lindenau".to_string(),
        }
    }

    pub fn from_config(config: &EmailConfig) -> Self {
        Self {
            default_from: config.default_from.clone(),
            contact_recipient: config.contact_recipient.clone(),
            site_name: config.site_name.clone(),
            ..Self::new()
        }
    }

    /// Make every subsequent send fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        self.emails
            .lock()
            .expect("emails lock poisoned by a prior panic")
            .clone()
    }

    /// Get emails whose reply-to is the given visitor address
    pub fn get_emails_from_visitor(&self, email: &str) -> Vec<CapturedEmail> {
        self.get_all_emails()
            .into_iter()
            .filter(|e| e.message.reply_to.as_deref() == Some(email))
            .collect()
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        self.emails
            .lock()
            .expect("emails lock poisoned by a prior panic")
            .len()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        self.emails
            .lock()
            .expect("emails lock poisoned by a prior panic")
            .clear();
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if self.failing.load(Ordering::SeqCst) {
            tracing::warn!(to = %message.to, "Mock email service in failing mode");
            return Err(EmailError::Unavailable(
                "mock provider configured to fail".to_string(),
            ));
        }

        tracing::info!(to = %message.to, "Mock email service capturing email");

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message,
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        self.emails
            .lock()
            .map_err(|e| EmailError::Unavailable(format!("emails lock poisoned: {e}")))?
            .push(captured);

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        self.default_from.clone()
    }

    fn contact_recipient(&self) -> String {
        self.contact_recipient.clone()
    }

    fn site_name(&self) -> &str {
        &self.site_name
    }
}
