use std::{fmt, sync::LazyLock};

use chrono::NaiveDate;
use luxe_quote::{EventType, PricingRequest, engine::lenient};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize_email, sanitize_phone, sanitize_text};

/// Which form a submission or rejection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Inquiry,
    Contact,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inquiry => "inquiry",
            Self::Contact => "contact",
        })
    }
}

/// Fields a validation error can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    EventType,
    EventDate,
    GuestCount,
    Location,
    Message,
}

impl FormField {
    /// Form input name, as the field is called in submitted data.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::EventType => "eventType",
            Self::EventDate => "eventDate",
            Self::GuestCount => "guestCount",
            Self::Location => "location",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// How the customer would like to be contacted back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
    WhatsApp,
}

impl fmt::Display for PreferredContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::WhatsApp => "whatsapp",
        })
    }
}

/// Request for a detailed quote. The event fields double as the pricing
/// request shown live next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(flatten)]
    pub event: PricingRequest,
    pub budget: String,
    pub message: String,
    pub preferred_contact: PreferredContact,
}

impl InquiryForm {
    pub fn pricing_request(&self) -> PricingRequest {
        self.event.clone()
    }

    /// Returns a copy with every free-form field cleaned.
    pub fn sanitized(&self) -> Self {
        let mut event = self.event.clone();
        event.selected_services = event
            .selected_services
            .iter()
            .map(|service| sanitize_text(service))
            .filter(|service| !service.is_empty())
            .collect();

        Self {
            name: sanitize_text(&self.name),
            email: sanitize_email(&self.email),
            phone: sanitize_phone(&self.phone),
            event,
            budget: sanitize_text(&self.budget),
            message: sanitize_text(&self.message),
            preferred_contact: self.preferred_contact,
        }
    }

    /// Checks the form against the booking rules, collecting every failure.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new(FormField::Name, "Name is required"));
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::new(FormField::Email, "Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new(FormField::Email, INVALID_EMAIL));
        }
        if self.phone.trim().is_empty() {
            errors.push(FieldError::new(FormField::Phone, "Phone is required"));
        } else if !is_valid_phone(&self.phone) {
            errors.push(FieldError::new(FormField::Phone, INVALID_PHONE));
        }
        if self.event.event_type.is_none() {
            errors.push(FieldError::new(FormField::EventType, "Event type is required"));
        }
        match self.event.event_date {
            None => errors.push(FieldError::new(FormField::EventDate, "Event date is required")),
            Some(date) if date < today => {
                errors.push(FieldError::new(FormField::EventDate, PAST_DATE))
            }
            Some(_) => {}
        }
        if self.event.guest_bracket.is_none() {
            errors.push(FieldError::new(FormField::GuestCount, "Guest count is required"));
        }
        if self.event.location.is_none() {
            errors.push(FieldError::new(FormField::Location, "Location is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// General contact message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(deserialize_with = "lenient")]
    pub event_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient")]
    pub event_type: Option<EventType>,
}

impl ContactForm {
    /// Returns a copy with every free-form field cleaned.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_text(&self.name),
            email: sanitize_email(&self.email),
            phone: sanitize_phone(&self.phone),
            message: sanitize_text(&self.message),
            event_date: self.event_date,
            event_type: self.event_type,
        }
    }

    /// Checks the form against the contact rules, collecting every failure.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                FormField::Name,
                "Name must be at least 2 characters long",
            ));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new(FormField::Email, INVALID_EMAIL));
        }
        if !is_valid_phone(&self.phone) {
            errors.push(FieldError::new(FormField::Phone, INVALID_PHONE));
        }
        if self.message.trim().chars().count() < 10 {
            errors.push(FieldError::new(
                FormField::Message,
                "Message must be at least 10 characters long",
            ));
        }
        if self.event_date.is_some_and(|date| date < today) {
            errors.push(FieldError::new(FormField::EventDate, PAST_DATE));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

const INVALID_EMAIL: &str = "Please enter a valid email address";
const INVALID_PHONE: &str = "Please enter a valid phone number";
const PAST_DATE: &str = "Event date cannot be in the past";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone regex should compile"));

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// An optional leading `+`, a non-zero digit, then up to 15 more digits.
/// Whitespace is ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.split_whitespace().collect();
    PHONE.is_match(&compact)
}
