use async_trait::async_trait;

use crate::error::SettingsResult;

/// Delivery channel for workflow mail.
///
/// The settings workflow produces a single kind of message: the confirmation
/// mail carrying the change-email verification link. Implement this trait
/// over your delivery backend and hand it to the config; the workflow calls
/// [`send`](Mailer::send) once per message and does not retry, so
/// implementations that need retries should do their own.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    ///
    /// `html` and `text` are two renderings of the same body. A channel that
    /// supports only one may ignore the other; either can be empty.
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> SettingsResult<()>;
}

/// Mailer for local development.
///
/// Writes the message to stderr instead of delivering it, so the
/// confirmation link can be copied straight out of the terminal. Only the
/// plain-text rendering is printed.
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, to: &str, subject: &str, _html: &str, text: &str) -> SettingsResult<()> {
        eprintln!("--- mail for {to} ---");
        eprintln!("subject: {subject}");
        eprintln!("{text}");
        eprintln!("---");
        Ok(())
    }
}
