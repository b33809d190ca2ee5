// SMTP Mail Transport - Using lettre
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// The core decides who and what; this module is the only place that knows
// how the mail actually leaves the process.

use crate::error::SendFailure;
use async_trait::async_trait;
use lettre::message::{header, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Default submission relay (the original deployment targets Gmail)
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// One rendered message ready for the transport
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Mail transport boundary
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message; failures are categorized, never panics
    async fn send(&self, email: &OutboundEmail) -> Result<(), SendFailure>;

    /// Verify that the relay accepts our credentials
    async fn test_connection(&self) -> Result<(), SendFailure>;
}

/// STARTTLS SMTP mailer
pub struct SmtpMailer {
    server: String,
    port: u16,
    sender: String,
    credential: String,
}

impl SmtpMailer {
    /// Create a mailer against the default relay
    pub fn new(sender: String, credential: String) -> Self {
        Self::with_relay(
            DEFAULT_SMTP_SERVER.to_string(),
            DEFAULT_SMTP_PORT,
            sender,
            credential,
        )
    }

    pub fn with_relay(server: String, port: u16, sender: String, credential: String) -> Self {
        Self {
            server,
            port,
            sender,
            credential,
        }
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, SendFailure> {
        let message = Message::builder()
            .from(self.sender.parse()?)
            .to(email.to.parse()?)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )?;

        Ok(message)
    }

    fn get_transport(&self) -> Result<SmtpTransport, SendFailure> {
        let creds = Credentials::new(self.sender.clone(), self.credential.clone());

        let transport = SmtpTransport::starttls_relay(&self.server)
            .map_err(|e| categorize_smtp_error(&e))?
            .credentials(creds)
            .port(self.port)
            .build();

        Ok(transport)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), SendFailure> {
        let message = self.build_message(email)?;
        let transport = self.get_transport()?;

        // lettre's sync transport blocks; keep it off the async runtime
        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| categorize_smtp_error(&e))
        })
        .await
        .map_err(|e| SendFailure::Other(format!("Send task failed: {}", e)))?
    }

    async fn test_connection(&self) -> Result<(), SendFailure> {
        let transport = self.get_transport()?;

        tokio::task::spawn_blocking(move || match transport.test_connection() {
            Ok(true) => Ok(()),
            Ok(false) => Err(SendFailure::Connection),
            Err(e) => Err(categorize_smtp_error(&e)),
        })
        .await
        .map_err(|e| SendFailure::Other(format!("Connection test task failed: {}", e)))?
    }
}

/// Map an SMTP error onto the small set of human-readable causes.
///
/// Matching on the rendered message keeps this independent of lettre's
/// internal error kinds; the 535/550/553 reply codes are stable SMTP.
fn categorize_smtp_error(err: &lettre::transport::smtp::Error) -> SendFailure {
    let message = err.to_string();
    let lower = message.to_lowercase();

    if lower.contains("535") || lower.contains("auth") || lower.contains("credentials") {
        SendFailure::Authentication
    } else if lower.contains("550")
        || lower.contains("553")
        || lower.contains("recipient")
        || lower.contains("mailbox")
    {
        SendFailure::RecipientRejected
    } else if lower.contains("connect")
        || lower.contains("network")
        || lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("tls")
        || lower.contains("resolve")
    {
        SendFailure::Connection
    } else {
        SendFailure::Other(message)
    }
}
