//! Outbound email dispatch over SMTP.
//!
//! [`EmailTransport`] is the seam the daily sender depends on:
//! [`SmtpMailer`] speaks STARTTLS to the configured relay in production,
//! and [`MockMailer`] records sends in tests.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Errors from building or dispatching an outbound email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// A from/to address did not parse as a mailbox.
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself could not be assembled.
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP conversation failed (connection, auth, or rejection).
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The recipient was refused before any SMTP exchange.
    #[error("recipient rejected: {0}")]
    Rejected(String),
}

/// Capability interface over outbound email.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// SMTP transport with STARTTLS and username/password auth.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Connects the relay configuration. `from` is the sender address used
    /// on every outgoing message.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Smtp`] when the relay host is rejected by
    /// the transport builder, or [`MailerError::Address`] when `from`
    /// does not parse.
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from: &str,
    ) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(port)
            .credentials(Credentials::new(username.to_owned(), password.to_owned()))
            .build();
        Ok(Self {
            transport,
            from: from.parse()?,
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .body(body.to_owned())?;
        self.transport.send(message).await?;
        tracing::debug!(to, subject, "email dispatched");
        Ok(())
    }
}

/// Test transport that records every send and can be told to fail for
/// specific recipients.
#[derive(Default)]
pub struct MockMailer {
    sent: std::sync::Mutex<Vec<(String, String, String)>>,
    fail_for: Vec<String>,
}

impl MockMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that fails for the given recipient addresses.
    #[must_use]
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail_for: recipients.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    /// `(to, subject, body)` tuples in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EmailTransport for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        if self.fail_for.iter().any(|r| r == to) {
            return Err(MailerError::Rejected(to.to_owned()));
        }
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((to.to_owned(), subject.to_owned(), body.to_owned()));
        Ok(())
    }
}
