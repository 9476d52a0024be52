//! Outbound mail
//!
//! SMTP mailer for the comment reply notification. The transport is built
//! once from configuration; when no SMTP host is configured the service
//! runs without a mailer and the fan-out is skipped.

use anyhow::{anyhow, Result};
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::{SiteConfig, SmtpConfig};
use crate::models::CommentRecipient;

/// SMTP mailer
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    site_name: String,
}

impl Mailer {
    /// Build a mailer from configuration. Returns `None` when no SMTP
    /// host is configured.
    pub fn from_config(smtp: &SmtpConfig, site: &SiteConfig) -> Result<Option<Self>> {
        let Some(host) = smtp.host.as_deref() else {
            return Ok(None);
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| anyhow!("Failed to create SMTP transport: {}", e))?
            .port(smtp.port);

        if let (Some(username), Some(password)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Some(Self {
            transport: builder.build(),
            from: smtp.from.clone(),
            site_name: site.name.clone(),
        }))
    }

    /// Send the "new reply" notification to one prior commenter.
    pub async fn send_comment_reply(
        &self,
        recipient: &CommentRecipient,
        article_title: &str,
        article_link: &str,
    ) -> Result<()> {
        let from = format!("{} <{}>", self.site_name, self.from);
        let body = format!(
            "Hi {},\n\nThere is a new comment on \"{}\", an article you commented on.\n\nRead the conversation: {}\n\n{}",
            recipient.name, article_title, article_link, self.site_name
        );

        let email = Message::builder()
            .from(from.parse().map_err(|e| anyhow!("Invalid from address: {}", e))?)
            .to(recipient
                .email
                .parse()
                .map_err(|e| anyhow!("Invalid recipient address {}: {}", recipient.email, e))?)
            .subject("New reply to your comment!")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| anyhow!("Failed to build email: {}", e))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_host_means_no_mailer() {
        let mailer = Mailer::from_config(&SmtpConfig::default(), &SiteConfig::default()).unwrap();
        assert!(mailer.is_none());
    }

    #[test]
    fn test_configured_host_builds_mailer() {
        let smtp = SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            ..Default::default()
        };
        let mailer = Mailer::from_config(&smtp, &SiteConfig::default()).unwrap();
        assert!(mailer.is_some());
    }
}
