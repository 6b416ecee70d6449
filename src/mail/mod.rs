pub mod message;
pub mod transport;

pub use message::OutgoingEmail;
pub use transport::TransportPreset;

use lettre::{
    message::{Mailbox, MultiPart},
    AsyncTransport, Message,
};

use crate::config::Config;

/// Fixed destination for contact-form submissions
pub const CONTACT_RECIPIENT: &str = "D247Online@outlook.com";

/// Errors raised while building or sending an email
#[derive(thiserror::Error, Debug)]
pub enum MailError {
    #[error("Invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound mail seam
///
/// The contact handler talks to this trait so endpoint tests can stub
/// success and failure without touching a real SMTP server.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Production mailer: selects a transport preset from the configured
/// sender address and sends over SMTP via lettre.
pub struct SmtpMailer {
    sender: String,
    password: String,
    smtp_host: String,
    smtp_port: u16,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Self {
        Self {
            sender: config.email_user.clone(),
            password: config.email_password.clone(),
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
        }
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let from: Mailbox = email.from.parse()?;
        let to: Mailbox = email.to.parse()?;
        let reply_to: Mailbox = email.reply_to.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .reply_to(reply_to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))?;

        let preset = TransportPreset::for_sender(&self.sender, &self.smtp_host, self.smtp_port);
        tracing::debug!(preset = ?preset, "Selected SMTP transport preset");

        // Transport is built fresh per send, never cached
        let transport = preset.build(&self.sender, &self.password)?;
        if let Err(err) = transport.send(message).await {
            tracing::error!(error = %err, code = ?err.status(), "SMTP send failed");
            return Err(err.into());
        }

        Ok(())
    }
}
