//! Outgoing email
//!
//! The identity service only needs `send(to, subject, html)`; SMTP delivery
//! is one implementation of it.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::MailConfig;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail relay is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Failure reported by a non-SMTP mailer
    #[error("Mail delivery failed: {0}")]
    Other(String),
}

pub trait Mailer: Send + Sync {
    fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// SMTP mailer. Without a host or sender address every send fails.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let (Some(host), Some(from_address)) = (&config.host, &config.from_address) else {
            warn!("SMTP host or sender address missing, outgoing email is disabled");
            return Ok(Self {
                transport: None,
                from: None,
            });
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, from_address).parse()?;

        let builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        }
        .port(config.port);

        let builder = if let (Some(username), Some(password)) = (&config.username, &config.password)
        {
            builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            builder
        };

        info!("SMTP mailer configured for {}:{}", host, config.port);
        Ok(Self {
            transport: Some(builder.build()),
            from: Some(from),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            return Err(MailError::NotConfigured("SMTP host"));
        };

        let message = build_message(from.clone(), to, subject, html)?;
        transport.send(message).await?;

        info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

fn build_message(from: Mailbox, to: &str, subject: &str, html: &str) -> Result<Message, MailError> {
    let to: Mailbox = to.parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html.to_string())?)
}
