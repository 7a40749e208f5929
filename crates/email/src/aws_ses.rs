//! AWS SES Email Service Implementation
//!
//! Delivers contact-form messages through AWS Simple Email Service (SES).
//! Setting `AWS_ENDPOINT_URL` points the client at LocalStack.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_ses::config::SharedCredentialsProvider;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use aws_sdk_ses::Client as SesClient;
use chrono::Utc;

use crate::{EmailConfig, EmailError, EmailMessage, EmailReceipt, EmailService};

/// AWS SES email service implementation
pub struct SesEmailService {
    client: SesClient,
    config: EmailConfig,
}

/// Load SDK configuration, pointing at LocalStack when an endpoint is set.
async fn load_sdk_config(region: &str, endpoint_url: Option<&str>) -> aws_config::SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    match endpoint_url {
        Some(endpoint_url) => {
            tracing::info!(endpoint = %endpoint_url, "Using custom AWS endpoint for SES");
            let credentials = Credentials::new(
                "test-access-key",
                "test-secret-key",
                None,
                None,
                "localstack-email-provider",
            );
            loader
                .endpoint_url(endpoint_url)
                .credentials_provider(SharedCredentialsProvider::new(credentials))
                .load()
                .await
        }
        None => loader.load().await,
    }
}

impl SesEmailService {
    /// Create a new SES email service
    pub async fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let region = config
            .aws_region
            .clone()
            .unwrap_or_else(|| "eu-central-1".to_string());

        let sdk_config = load_sdk_config(&region, config.aws_endpoint_url.as_deref()).await;
        let client = SesClient::new(&sdk_config);

        match client.get_send_quota().send().await {
            Ok(_) => tracing::info!(region = %region, "Connected to AWS SES"),
            // LocalStack may not have SES fully configured yet
            Err(e) => tracing::warn!(error = %e, "SES quota check failed"),
        }

        Ok(Self { client, config })
    }

    fn build_ses_message(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        let mut body = Body::builder().text(utf8_content(&message.body_text, "text body")?);
        if let Some(html_body) = &message.body_html {
            body = body.html(utf8_content(html_body, "HTML body")?);
        }

        Ok(Message::builder()
            .subject(utf8_content(&message.subject, "subject")?)
            .body(body.build())
            .build())
    }

    fn build_destination(&self, to: &str) -> Destination {
        Destination::builder().to_addresses(to).build()
    }
}

fn utf8_content(data: &str, part: &str) -> Result<Content, EmailError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| EmailError::AwsSes(format!("Failed to build {}: {}", part, e)))
}

#[async_trait::async_trait]
impl EmailService for SesEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        tracing::info!(to = %message.to, subject = %message.subject, "Sending email via AWS SES");

        if !message.to.contains('@') || !message.from.contains('@') {
            return Err(EmailError::Validation(
                "Invalid email address format".to_string(),
            ));
        }

        let ses_message = self.build_ses_message(&message)?;
        let destination = self.build_destination(&message.to);

        let mut send_builder = self
            .client
            .send_email()
            .source(&message.from)
            .destination(destination)
            .message(ses_message);

        // Add reply-to if provided
        if let Some(reply_to) = &message.reply_to {
            send_builder = send_builder.reply_to_addresses(reply_to);
        }

        let result = send_builder
            .send()
            .await
            .map_err(|e| EmailError::AwsSes(format!("Failed to send email: {}", e)))?;

        let message_id = result.message_id().to_string();

        tracing::info!(message_id = %message_id, "Email sent via SES");

        Ok(EmailReceipt {
            message_id,
            sent_at: Utc::now(),
            provider: "aws-ses".to_string(),
            metadata: message.metadata.clone(),
        })
    }

    fn default_from(&self) -> String {
        self.config.default_from.clone()
    }

    fn contact_recipient(&self) -> String {
        self.config.contact_recipient.clone()
    }

    fn site_name(&self) -> &str {
        &self.config.site_name
    }
}
