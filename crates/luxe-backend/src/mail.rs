//! Delivery of submitted forms as templated email.

use std::collections::BTreeMap;

use async_trait::async_trait;
use luxe_bridge::config::MailConfig;
use serde::Serialize;

/// Values substituted into a mail template.
pub type TemplateParams = BTreeMap<&'static str, String>;

/// Which configured template a message is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTemplate {
    Inquiry,
    Contact,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Credentials are empty or still hold the placeholders of a fresh
    /// configuration file.
    #[error("mail delivery is not configured (missing {})", .missing.join(", "))]
    NotConfigured { missing: Vec<&'static str> },
    #[error("mail request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    /// The mail service answered with a non-success status.
    #[error("mail service rejected the message ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Something that can deliver a rendered template.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, template: MailTemplate, params: TemplateParams) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Sends mail through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl EmailJsMailer {
    pub fn new(client: reqwest::Client, config: MailConfig) -> Self {
        Self { client, config }
    }

    fn template_id(&self, template: MailTemplate) -> &str {
        match template {
            MailTemplate::Inquiry => &self.config.inquiry_template_id,
            MailTemplate::Contact => &self.config.contact_template_id,
        }
    }
}

#[async_trait]
impl Mailer for EmailJsMailer {
    async fn send(&self, template: MailTemplate, params: TemplateParams) -> Result<(), MailError> {
        let missing = self.config.missing_keys();
        if !missing.is_empty() {
            return Err(MailError::NotConfigured { missing });
        }

        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: self.template_id(template),
            user_id: &self.config.public_key,
            template_params: &params,
        };
        log::debug!("Sending {template:?} mail via {}", self.config.endpoint);

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected { status, body })
    }
}
