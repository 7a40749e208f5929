//! Lindenau Email Service
//!
//! Forwards contact-form messages to the studio inbox with support for:
//! - AWS SES integration for production email delivery
//! - Mock email service for testing and development
//! - LocalStack integration for local E2E testing

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aws_ses;
pub mod content;
pub mod mock;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email configuration error: {0}")]
    Configuration(String),

    #[error("Email validation error: {0}")]
    Validation(String),

    #[error("AWS SES error: {0}")]
    AwsSes(String),

    #[error("Email provider unavailable: {0}")]
    Unavailable(String),
}

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl EmailMessage {
    /// Create a new email message
    pub fn new(to: String, from: String, subject: String, body_text: String) -> Self {
        Self {
            to,
            from,
            reply_to: None,
            subject,
            body_text,
            body_html: None,
            metadata: HashMap::new(),
        }
    }

    /// Add HTML body content
    pub fn with_html(mut self, body_html: String) -> Self {
        self.body_html = Some(body_html);
        self
    }

    /// Add reply-to address
    pub fn with_reply_to(mut self, reply_to: String) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Add metadata for tracking
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Email delivery receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
    pub provider: String,
    pub metadata: HashMap<String, String>,
}

/// A visitor's message from the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email service provider (ses, mock)
    pub provider: String,
    /// AWS region for SES
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// Verified sender address
    pub default_from: String,
    /// Inbox receiving contact-form messages
    pub contact_recipient: String,
    /// Enable email sending (can disable for testing)
    pub enabled: bool,
    /// Site name used in subject lines
    pub site_name: String,
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Result<Self, EmailError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let aws_region = std::env::var("AWS_REGION").ok();
        let aws_endpoint_url = std::env::var("AWS_ENDPOINT_URL").ok();

        let default_from = std::env::var("FROM_EMAIL")
            .unwrap_or_else(|_| "website@tatjana-lindenau.de".to_string());

        let contact_recipient =
            std::env::var("CONTACT_RECIPIENT").unwrap_or_else(|_| default_from.clone());

        if !contact_recipient.contains('@') {
            return Err(EmailError::Configuration(format!(
                "CONTACT_RECIPIENT is not an email address: {}",
                contact_recipient
            )));
        }

        let enabled = std::env::var("EMAIL_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let site_name =
            std::env::var("SITE_NAME").unwrap_or_else(|_| "Tatjana Lindenau".to_string());

        Ok(Self {
            provider,
            aws_region,
            aws_endpoint_url,
            default_from,
            contact_recipient,
            enabled,
            site_name,
        })
    }
}

/// Email service trait for different implementations
#[async_trait::async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email message
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError>;

    /// Return the default "from" address for outgoing emails
    fn default_from(&self) -> String;

    /// Return the inbox that receives contact-form messages
    fn contact_recipient(&self) -> String;

    /// Return the site name used in subject lines
    fn site_name(&self) -> &str;

    /// Forward a contact-form message to the studio inbox.
    ///
    /// The visitor's address goes into `Reply-To`; the sender stays the
    /// verified site address.
    async fn send_contact_message(
        &self,
        contact: &ContactMessage,
    ) -> Result<EmailReceipt, EmailError> {
        let subject = content::contact_subject(self.site_name(), &contact.subject);
        let body_text = content::contact_message_text(
            &contact.name,
            &contact.email,
            &contact.subject,
            &contact.message,
        );
        let body_html = content::contact_message_html(
            &contact.name,
            &contact.email,
            &contact.subject,
            &contact.message,
        );

        let message = EmailMessage::new(
            self.contact_recipient(),
            self.default_from(),
            subject,
            body_text,
        )
        .with_html(body_html)
        .with_reply_to(contact.email.trim().to_string())
        .with_metadata("email_type".to_string(), "contact".to_string())
        .with_metadata("sender_name".to_string(), contact.name.trim().to_string());

        self.send_email(message).await
    }
}

/// Email service factory
pub struct EmailServiceFactory;

impl EmailServiceFactory {
    /// Create email service based on configuration
    pub async fn create(config: EmailConfig) -> Result<Box<dyn EmailService>, EmailError> {
        if !config.enabled {
            tracing::info!("Email service disabled, using mock implementation");
            return Ok(Box::new(mock::MockEmailService::from_config(&config)));
        }

        match config.provider.as_str() {
            "ses" | "aws-ses" => {
                tracing::info!("Creating AWS SES email service");
                let ses_service = aws_ses::SesEmailService::new(config).await?;
                Ok(Box::new(ses_service))
            }
            "mock" => {
                tracing::info!("Creating mock email service");
                Ok(Box::new(mock::MockEmailService::from_config(&config)))
            }
            provider => Err(EmailError::Configuration(format!(
                "Unknown email provider: {}. Supported providers: ses, mock",
                provider
            ))),
        }
    }
}
