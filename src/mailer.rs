use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tokio::time::timeout;

use crate::constants::*;

#[cfg(test)]
use mockall::automock;

pub struct EmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

#[cfg_attr(test, automock)]
impl EmailClient {
    pub fn new() -> anyhow::Result<Self> {
        // sender account must come from environment, host falls back to gmail
        let host = std::env::var("SMTP_HOST").unwrap_or(SMTP_DEFAULT_HOST.to_owned());
        let user = std::env::var("EMAIL_USER").expect("EMAIL_USER not found in .env file");
        let pass = std::env::var("EMAIL_PASS").expect("EMAIL_PASS not found in .env file");
        let creds = Credentials::new(user.to_owned(), pass);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?
            .credentials(creds)
            .build();
        let from = user.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }

    /// Deliver a plain text mail. A send exceeding the bounded timeout is
    /// reported as a failure so the caller can roll back whatever the mail
    /// was carrying.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .body(body.to_owned())?;
        let deadline = Duration::from_secs(MAIL_SEND_TIMEOUT_SECS);
        match timeout(deadline, self.transport.send(email)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(anyhow::anyhow!(
                "smtp send to {to} timed out after {MAIL_SEND_TIMEOUT_SECS}s"
            )),
        }
    }
}
