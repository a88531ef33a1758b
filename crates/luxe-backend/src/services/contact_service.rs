use chrono::NaiveDate;
use luxe_bridge::forms::{ContactForm, FormKind};
use luxe_toast::PromiseMessages;

use super::{AppContextHandle, submission};
use crate::mail::{MailTemplate, TemplateParams};

const INVALID: &str = "Please correct the highlighted fields";
const SENDING: &str = "Sending your message...";
const SENT: &str = "Message sent successfully! We'll get back to you soon.";
const FAILED: &str = "Failed to send message. Please try again or contact us directly.";

fn template_params(form: &ContactForm, business_name: &str) -> TemplateParams {
    TemplateParams::from([
        ("from_name", form.name.clone()),
        ("from_email", form.email.clone()),
        ("phone", form.phone.clone()),
        ("message", form.message.clone()),
        (
            "event_date",
            form.event_date.map(|date| date.to_string()).unwrap_or_default(),
        ),
        (
            "event_type",
            form.event_type
                .map(|event| event.label().to_string())
                .unwrap_or_default(),
        ),
        ("to_name", business_name.to_string()),
        ("reply_to", form.email.clone()),
    ])
}

/// Runs a contact message through validation, rate limiting and delivery.
pub(crate) async fn submit_contact(context: AppContextHandle, form: ContactForm, today: NaiveDate) {
    let form = form.sanitized();
    if let Err(errors) = form.validate(today) {
        submission::reject_invalid(&context, FormKind::Contact, errors, INVALID).await;
        return;
    }
    if !submission::admit(&context, FormKind::Contact, &form.email).await {
        return;
    }

    let business_name = {
        let state = context.state.read().await;
        state.config.business.name.clone()
    };

    let messages = PromiseMessages::new()
        .loading(SENDING)
        .success(SENT)
        .error(FAILED);
    submission::deliver(
        &context,
        FormKind::Contact,
        MailTemplate::Contact,
        template_params(&form, &business_name),
        messages,
    )
    .await;
}

/// Handles an incoming contact message (see
/// [`luxe_bridge::MessageToBackend::SubmitContact`]).
pub fn handle_contact_submission(context: AppContextHandle, form: ContactForm) {
    tokio::spawn(submit_contact(context, form, super::today()));
}
