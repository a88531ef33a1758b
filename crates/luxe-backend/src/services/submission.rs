//! Steps shared by every form submission.

use luxe_bridge::{
    MessageFromBackend,
    forms::{FieldError, FormKind},
};
use luxe_toast::PromiseMessages;

use super::AppContextHandle;
use crate::{
    mail::{MailTemplate, TemplateParams},
    rate_limit::minutes_until_reset,
};

/// Identifier used for senders that left the email empty.
const ANONYMOUS: &str = "anonymous";

/// Reports a form that failed validation.
pub(crate) async fn reject_invalid(
    context: &AppContextHandle,
    form: FormKind,
    errors: Vec<FieldError>,
    message: &str,
) {
    log::debug!("Rejected invalid {form} form: {errors:?}");
    context.toaster.error(message);
    context
        .send(MessageFromBackend::FormRejected { form, errors })
        .await;
}

/// Counts a submission against the sender's limit. Returns `false`, after
/// telling the user how long to wait, when the limit is reached.
pub(crate) async fn admit(context: &AppContextHandle, form: FormKind, sender: &str) -> bool {
    let sender = if sender.is_empty() { ANONYMOUS } else { sender };
    let verdict = {
        let mut state = context.state.write().await;
        state.rate_limiter.check(sender)
    };

    let Err(remaining) = verdict else {
        return true;
    };

    log::warn!("Rate limited {form} submission from {sender}");
    context.toaster.warning(format!(
        "Too many submission attempts. Please wait {} minutes before trying again.",
        minutes_until_reset(remaining)
    ));
    context
        .send(MessageFromBackend::FormRejected {
            form,
            errors: Vec::new(),
        })
        .await;
    false
}

/// Sends the rendered form while a loading notification is shown, then
/// reports the outcome to the frontend.
pub(crate) async fn deliver(
    context: &AppContextHandle,
    form: FormKind,
    template: MailTemplate,
    params: TemplateParams,
    messages: PromiseMessages,
) {
    let mailer = context.mailer.clone();
    let result = context
        .toaster
        .promise(mailer.send(template, params), messages)
        .await;

    match result {
        Ok(()) => {
            log::info!("Delivered {form} submission");
            context
                .send(MessageFromBackend::SubmissionAccepted(form))
                .await;
        }
        Err(e) => {
            log::error!("Failed to deliver {form} submission: {e}");
            context
                .send(MessageFromBackend::SubmissionFailed {
                    form,
                    reason: e.to_string(),
                })
                .await;
        }
    }
}
