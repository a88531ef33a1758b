use chrono::NaiveDate;
use luxe_bridge::{
    MessageFromBackend,
    config::BusinessConfig,
    forms::{FormKind, InquiryForm},
    notification::NotificationAction,
    share::ShareChannel,
};
use luxe_quote::format_currency;
use luxe_toast::PromiseMessages;

use super::{AppContextHandle, share_service::share_link, submission};
use crate::mail::{MailTemplate, TemplateParams};

const INVALID: &str = "Please fill in all required fields";
const SENDING: &str = "Sending your inquiry...";
const SENT: &str =
    "Inquiry sent successfully! We'll contact you within 24 hours with a detailed quote.";
const FAILED: &str = "Failed to send inquiry. Please try again.";

/// Renders an inquiry into the fields of the inquiry mail template.
fn template_params(form: &InquiryForm, business: &BusinessConfig) -> TemplateParams {
    fn label(value: Option<impl ToString>) -> String {
        value.map(|value| value.to_string()).unwrap_or_default()
    }

    let event = &form.event;
    let estimate = luxe_quote::calculate(event);
    let services: Vec<&str> = event.selected_services.iter().map(String::as_str).collect();

    TemplateParams::from([
        ("name", form.name.clone()),
        ("email", form.email.clone()),
        ("phone", form.phone.clone()),
        ("eventType", label(event.event_type)),
        ("eventDate", label(event.event_date)),
        ("guestCount", label(event.guest_bracket)),
        ("location", label(event.location)),
        ("duration", label(event.duration)),
        ("services", services.join(", ")),
        ("budget", form.budget.clone()),
        ("message", form.message.clone()),
        ("preferredContact", form.preferred_contact.to_string()),
        ("estimated_cost", format_currency(estimate.total)),
        ("to_name", business.name.clone()),
    ])
}

/// Runs an inquiry through validation, rate limiting and delivery.
pub(crate) async fn submit_inquiry(context: AppContextHandle, form: InquiryForm, today: NaiveDate) {
    let form = form.sanitized();
    if let Err(errors) = form.validate(today) {
        submission::reject_invalid(&context, FormKind::Inquiry, errors, INVALID).await;
        return;
    }
    if !submission::admit(&context, FormKind::Inquiry, &form.email).await {
        return;
    }

    let business = {
        let state = context.state.read().await;
        state.config.business.clone()
    };
    let params = template_params(&form, &business);

    let link = share_link(&business, &form.pricing_request(), ShareChannel::WhatsApp);
    let tx = context.tx.clone();
    let share = NotificationAction::new("Share on WhatsApp", move || {
        if let Err(e) = tx.try_send(MessageFromBackend::ShareLinkResponse(link.clone())) {
            log::warn!("Failed to hand the share link to the frontend: {e}");
        }
    });

    let messages = PromiseMessages::new()
        .loading(SENDING)
        .success(SENT)
        .error(FAILED)
        .success_action(share);
    submission::deliver(
        &context,
        FormKind::Inquiry,
        MailTemplate::Inquiry,
        params,
        messages,
    )
    .await;
}

/// Handles an incoming inquiry (see
/// [`luxe_bridge::MessageToBackend::SubmitInquiry`]). Delivery runs on its
/// own task so other requests keep being served meanwhile.
pub fn handle_inquiry_submission(context: AppContextHandle, form: InquiryForm) {
    tokio::spawn(submit_inquiry(context, form, super::today()));
}
