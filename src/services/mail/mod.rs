//! 邮件发送
//!
//! `mail.enabled = true` 时通过 SMTP（lettre）发送，否则只写日志。
//! 发送失败不会让请求失败，只记录错误。

pub mod templates;

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::{AppConfig, MailConfig};
use crate::errors::{ParcError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// 只记录收件人和主题，正文可能包含临时密码
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            "Mail delivery disabled, would send \"{}\" to {}",
            message.subject, message.to
        );
        Ok(())
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| ParcError::mail(format!("Invalid SMTP relay: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let builder = builder.port(config.smtp_port);
        let transport = if config.username.is_empty() {
            builder.build()
        } else {
            builder
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ))
                .build()
        };

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| ParcError::mail(format!("Invalid sender address: {e}")))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| ParcError::mail(format!("Invalid recipient {}: {e}", message.to)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| ParcError::mail(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| ParcError::mail(e.to_string()))?;

        info!("Sent \"{}\" to {}", message.subject, message.to);
        Ok(())
    }
}

/// 根据配置创建邮件发送器，SMTP 配置无效时退回日志模式
pub fn create_mailer() -> Arc<dyn Mailer> {
    let config = &AppConfig::get().mail;
    if !config.enabled {
        return Arc::new(LogMailer);
    }

    match SmtpMailer::new(config) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            error!("{}, falling back to log-only mail delivery", e);
            Arc::new(LogMailer)
        }
    }
}

/// 发送并吞掉错误
pub async fn deliver(mailer: &dyn Mailer, message: MailMessage) {
    let to = message.to.clone();
    let subject = message.subject.clone();
    if let Err(e) = mailer.send(message).await {
        error!("Failed to send \"{}\" to {}: {}", subject, to, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_accepts_everything() {
        let message = MailMessage {
            to: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "Body".to_string(),
        };
        assert!(LogMailer.send(message).await.is_ok());
    }

    #[tokio::test]
    async fn test_smtp_mailer_rejects_bad_sender() {
        let config = MailConfig {
            enabled: true,
            starttls: false,
            from: "not an address".to_string(),
            ..MailConfig::default()
        };
        let err = SmtpMailer::new(&config).err().unwrap();
        assert_eq!(err.code(), "P014");
    }
}
