/// SMTP email delivery
///
/// Builds and sends the notification emails over an async SMTP
/// transport with STARTTLS. Message construction is separated from
/// sending so it can be tested without a relay.
///
/// # Example
///
/// ```no_run
/// use taskboard_worker::config::MailConfig;
/// use taskboard_worker::mailer::Mailer;
///
/// # async fn example(config: &MailConfig) -> anyhow::Result<()> {
/// let mailer = Mailer::new(config)?;
/// mailer.send("user@example.com", "Ship release", "done").await?;
/// # Ok(())
/// # }
/// ```

use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::MailConfig;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// Malformed sender or recipient address
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Message construction failed
    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP transport failure
    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// SMTP mailer
///
/// The transport is built once at startup; an invalid relay host fails
/// the worker process immediately.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Creates a mailer from relay configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the sender address is malformed or the
    /// transport cannot be constructed.
    pub fn new(config: &MailConfig) -> Result<Self, MailerError> {
        let from: Mailbox = config.from_address.parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    /// Builds the notification message for a task action
    ///
    /// Subject: `Task {action}: {title}`; plain-text body.
    pub fn build_message(
        &self,
        to: &str,
        task_title: &str,
        action: &str,
    ) -> Result<Message, MailerError> {
        let recipient: Mailbox = to.parse()?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(format!("Task {}: {}", action, task_title))
            .body(format!(
                "Hi,\n\nThe task '{}' has been {}.\n\nThanks,\nTaskboard",
                task_title,
                action.to_lowercase()
            ))?;

        Ok(message)
    }

    /// Sends a notification email
    ///
    /// # Errors
    ///
    /// Returns an error on address, construction, or transport failure.
    /// The consumer logs and drops these — no retry, no dead-letter.
    pub async fn send(&self, to: &str, task_title: &str, action: &str) -> Result<(), MailerError> {
        let message = self.build_message(to, task_title, action)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_mailer() -> Mailer {
        Mailer::new(&MailConfig {
            server: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer".to_string(),
            password: "secret".to_string(),
            from_address: "Taskboard <noreply@example.com>".to_string(),
        })
        .expect("mailer should build")
    }

    #[tokio::test]
    async fn test_build_message_content() {
        let mailer = test_mailer();
        let message = mailer
            .build_message("user@example.com", "Ship release", "done")
            .unwrap();

        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("Subject: Task done: Ship release"));
        assert!(raw.contains("has been done"));
        assert!(raw.contains("noreply@example.com"));
        assert!(raw.contains("user@example.com"));
    }

    #[tokio::test]
    async fn test_action_is_lowercased_in_body() {
        let mailer = test_mailer();
        let message = mailer
            .build_message("user@example.com", "Write docs", "Assigned")
            .unwrap();

        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("Subject: Task Assigned: Write docs"));
        assert!(raw.contains("has been assigned"));
    }

    #[tokio::test]
    async fn test_bad_recipient_is_an_error() {
        let mailer = test_mailer();
        let result = mailer.build_message("not-an-address", "T", "done");
        assert!(matches!(result, Err(MailerError::Address(_))));
    }
}
