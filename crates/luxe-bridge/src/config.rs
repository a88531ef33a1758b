use serde::{Deserialize, Serialize};

use crate::notification::NotificationPosition;

/// Placeholder prefix written into fresh configuration files for values the
/// operator still has to fill in.
pub const PLACEHOLDER_PREFIX: &str = "your_";

/// Controls where and how notifications are presented.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Screen corner the notification stack is anchored to.
    pub position: NotificationPosition,
}

/// Business identity used in outgoing mail and shared quotes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Display name, used as the mail recipient name and in quote summaries.
    pub name: String,
    /// Address the email share link is addressed to.
    pub email: String,
    /// WhatsApp number in international format. Non-digits are ignored.
    pub whatsapp_number: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Pinch of Luxe Events".into(),
            email: "info@pinchofluxeevents.com".into(),
            whatsapp_number: "+13019063939".into(),
        }
    }
}

/// Credentials and templates of the EmailJS account forms are delivered
/// through.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// REST endpoint the send request is posted to.
    pub endpoint: String,
    pub service_id: String,
    pub inquiry_template_id: String,
    pub contact_template_id: String,
    /// Public key of the account, sent as `user_id`.
    pub public_key: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
            service_id: "your_service_id".into(),
            inquiry_template_id: "your_inquiry_template_id".into(),
            contact_template_id: "your_contact_template_id".into(),
            public_key: "your_public_key".into(),
        }
    }
}

impl MailConfig {
    /// Names of the credentials that are empty or still hold a placeholder.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("service_id", &self.service_id),
            ("inquiry_template_id", &self.inquiry_template_id),
            ("contact_template_id", &self.contact_template_id),
            ("public_key", &self.public_key),
        ]
        .into_iter()
        .filter(|(_, value)| {
            let value = value.trim();
            value.is_empty() || value.starts_with(PLACEHOLDER_PREFIX)
        })
        .map(|(key, _)| key)
        .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.missing_keys().is_empty()
    }
}

/// Limits on how often a single sender may submit forms.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionsConfig {
    /// Submissions allowed per sender within one window.
    pub max_attempts: usize,
    /// Length of the sliding window in seconds.
    pub window_secs: u64,
}

impl Default for SubmissionsConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window_secs: 10 * 60,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub notifications: NotificationsConfig,
    pub business: BusinessConfig,
    pub mail: MailConfig,
    pub submissions: SubmissionsConfig,
}
