use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::repository::MailPort;
use crate::domain::types::MailMessage;
use crate::error::ApiError;

/// Mail transport selected from configuration.
#[derive(Clone)]
pub enum Mailer {
    File(FileMailer),
    Http(HttpMailer),
}

impl Mailer {
    pub fn from_config(relay_url: Option<&str>, file_path: PathBuf) -> Self {
        match relay_url {
            Some(url) => Self::Http(HttpMailer::new(url)),
            None => Self::File(FileMailer { dir: file_path }),
        }
    }
}

impl MailPort for Mailer {
    async fn send(&self, message: &MailMessage) -> Result<(), ApiError> {
        match self {
            Self::File(m) => m.send(message).await,
            Self::Http(m) => m.send(message).await,
        }
    }
}

// ── File transport ───────────────────────────────────────────────────────────

/// Writes each message to its own file under `dir`.
#[derive(Clone)]
pub struct FileMailer {
    pub dir: PathBuf,
}

impl FileMailer {
    fn render(message: &MailMessage, message_id: Uuid) -> String {
        let date = Utc::now().to_rfc2822();
        format!(
            "Content-Type: text/plain; charset=\"utf-8\"\n\
             MIME-Version: 1.0\n\
             Content-Transfer-Encoding: 8bit\n\
             Subject: {subject}\n\
             From: {from}\n\
             To: {to}\n\
             Date: {date}\n\
             Message-ID: <{message_id}@yamdb>\n\
             \n\
             {body}\n\
             {separator}\n",
            subject = message.subject,
            from = message.from,
            to = message.to,
            body = message.body,
            separator = "-".repeat(79),
        )
    }
}

impl MailPort for FileMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create mail directory {}", self.dir.display()))?;
        let id = Uuid::new_v4();
        let name = format!("{}-{id}.log", Utc::now().format("%Y%m%d-%H%M%S"));
        let path = self.dir.join(name);
        tokio::fs::write(&path, Self::render(message, id))
            .await
            .with_context(|| format!("write mail file {}", path.display()))?;
        Ok(())
    }
}

// ── HTTP relay transport ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

impl HttpMailer {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_owned(),
        }
    }
}

impl MailPort for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), ApiError> {
        let payload = RelayPayload {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            body: &message.body,
        };
        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .context("send mail to relay")?
            .error_for_status()
            .context("mail relay rejected message")?;
        Ok(())
    }
}
