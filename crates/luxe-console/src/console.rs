//! Console state: the inquiry being drafted and the last notification list
//! the backend pushed.

use luxe_bridge::{
    MessageFromBackend, MessageToBackend,
    forms::{FormKind, InquiryForm},
    notification::{Notification, NotificationPosition},
};

use crate::{
    command::{Command, DraftEdit},
    render,
};

/// What the run loop should do after a command.
#[derive(Debug)]
pub enum Outcome {
    Send(Vec<MessageToBackend>),
    Print(String),
    Quit,
}

#[derive(Debug, Default)]
pub struct Console {
    inquiry: InquiryForm,
    position: NotificationPosition,
    notifications: Vec<Notification>,
}

impl Console {
    pub fn inquiry(&self) -> &InquiryForm {
        &self.inquiry
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    fn quote_request(&self) -> MessageToBackend {
        MessageToBackend::QuoteRequest(self.inquiry.pricing_request())
    }

    fn edit(&mut self, edit: DraftEdit) -> Result<(), String> {
        let form = &mut self.inquiry;
        match edit {
            DraftEdit::Name(name) => form.name = name,
            DraftEdit::Email(email) => form.email = email,
            DraftEdit::Phone(phone) => form.phone = phone,
            DraftEdit::EventType(event) => form.event.event_type = Some(event),
            DraftEdit::Guests(guests) => form.event.guest_bracket = Some(guests),
            DraftEdit::Location(location) => form.event.location = Some(location),
            DraftEdit::Duration(duration) => form.event.duration = Some(duration),
            DraftEdit::Date(date) => form.event.event_date = Some(date),
            DraftEdit::Budget(budget) => form.budget = budget,
            DraftEdit::Message(message) => form.message = message,
            DraftEdit::PreferredContact(contact) => form.preferred_contact = contact,
            DraftEdit::AddService(name) => {
                let service = luxe_quote::catalog::standard()
                    .services()
                    .find(|service| service.name.eq_ignore_ascii_case(&name))
                    .ok_or_else(|| format!("Unknown service `{name}`."))?;
                form.event.selected_services.insert(service.name.clone());
            }
            DraftEdit::RemoveService(name) => form
                .event
                .selected_services
                .retain(|service| !service.eq_ignore_ascii_case(&name)),
        }
        Ok(())
    }

    /// Applies a typed command. Every draft change asks for a fresh quote.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let message = match command {
            Command::Help => return Outcome::Print(render::HELP.to_string()),
            Command::Quit => return Outcome::Quit,
            Command::Show => return Outcome::Print(render::draft(&self.inquiry)),
            Command::Config => MessageToBackend::ConfigurationRequest,
            Command::Edit(edit) => {
                if let Err(problem) = self.edit(edit) {
                    return Outcome::Print(problem);
                }
                self.quote_request()
            }
            Command::Reset => {
                self.inquiry = InquiryForm::default();
                self.quote_request()
            }
            Command::Quote => self.quote_request(),
            Command::Inquire => MessageToBackend::SubmitInquiry(self.inquiry.clone()),
            Command::Contact(form) => MessageToBackend::SubmitContact(form),
            Command::Share(channel) => MessageToBackend::ShareQuoteRequest {
                request: self.inquiry.pricing_request(),
                channel,
            },
            Command::Dismiss(id) => MessageToBackend::DismissNotification(id),
            Command::Action(id) => MessageToBackend::InvokeNotificationAction(id),
            Command::Clear => MessageToBackend::ClearNotifications,
        };
        Outcome::Send(vec![message])
    }

    /// Folds a backend message into the console state and returns the text
    /// to print for it.
    pub fn receive(&mut self, message: MessageFromBackend) -> String {
        match message {
            MessageFromBackend::ConfigurationResponse(config) => {
                self.position = config.notifications.position;
                render::config(&config)
            }
            MessageFromBackend::QuoteResponse { breakdown, .. } => render::quote(&breakdown),
            MessageFromBackend::NotificationsChanged(notifications) => {
                self.notifications = notifications;
                render::notifications(&self.notifications, self.position)
            }
            MessageFromBackend::FormRejected { form, errors } => {
                render::field_errors(form, &errors)
            }
            MessageFromBackend::SubmissionAccepted(form) => {
                if form == FormKind::Inquiry {
                    self.inquiry = InquiryForm::default();
                }
                format!("The {form} form was sent and cleared.")
            }
            MessageFromBackend::SubmissionFailed { form, reason } => {
                log::warn!("Delivery of the {form} form failed: {reason}");
                format!("The {form} form was kept so you can try again.")
            }
            MessageFromBackend::ShareLinkResponse(link) => render::share_link(&link),
        }
    }
}
