use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, Tokio1Executor,
};

use super::MailError;

const GMAIL_RELAY: &str = "smtp.gmail.com";
const OFFICE365_HOST: &str = "smtp.office365.com";
const OFFICE365_PORT: u16 = 587;

/// Named bundle of SMTP connection parameters, selected by substring match
/// on the configured sender address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportPreset {
    /// Gmail relay on the implicit-TLS well-known port
    GmailService,
    /// Office365 SMTP with forced STARTTLS and relaxed certificate validation
    Office365,
    /// Generic SMTP server, host and port from `SMTP_HOST`/`SMTP_PORT`
    /// or their defaults, with relaxed certificate validation
    Generic { host: String, port: u16 },
}

impl TransportPreset {
    /// Pure function of the sender string; first match wins.
    pub fn for_sender(sender: &str, smtp_host: &str, smtp_port: u16) -> Self {
        if sender.contains("@gmail.com") {
            TransportPreset::GmailService
        } else if sender.contains("@outlook.com") || sender.contains("@hotmail.com") {
            TransportPreset::Office365
        } else {
            TransportPreset::Generic {
                host: smtp_host.to_string(),
                port: smtp_port,
            }
        }
    }

    /// Builds the lettre transport for this preset
    pub fn build(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let creds = Credentials::new(username.to_string(), password.to_string());

        let transport = match self {
            TransportPreset::GmailService => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(GMAIL_RELAY)?
                    .credentials(creds)
                    .build()
            }
            TransportPreset::Office365 => {
                let tls = TlsParameters::builder(OFFICE365_HOST.to_string())
                    .dangerous_accept_invalid_certs(true)
                    .build()?;
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(OFFICE365_HOST)
                    .port(OFFICE365_PORT)
                    .tls(Tls::Required(tls))
                    .credentials(creds)
                    .build()
            }
            TransportPreset::Generic { host, port } => {
                let tls = TlsParameters::builder(host.clone())
                    .dangerous_accept_invalid_certs(true)
                    .build()?;
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                    .port(*port)
                    .tls(Tls::Opportunistic(tls))
                    .credentials(creds)
                    .build()
            }
        };

        Ok(transport)
    }
}
