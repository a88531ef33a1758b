//! Text rendering of backend state for the console.

use std::fmt::Write;

use luxe_bridge::{
    config::Config,
    forms::{FieldError, FormKind, InquiryForm},
    notification::{Notification, NotificationPosition},
    share::ShareLink,
};
use luxe_quote::{PricingBreakdown, format_currency};

use crate::formatting::{format_lifetime, kind_marker};

pub const HELP: &str = "\
Inquiry draft:
  set <field> <value>      name, email, phone, event, guests, location,
                           duration, date, budget, message, contact
  service add|remove <name>
  show | reset | quote | inquire
Contact:
  contact name=.. email=.. phone=.. message=.. [date=YYYY-MM-DD] [event=..]
Sharing:
  share whatsapp|email
Notifications:
  dismiss <id> | action <id> | clear
Other:
  config | help | quit";

fn amount(value: f64) -> String {
    format_currency(value.round() as i64)
}

pub fn quote(breakdown: &PricingBreakdown) -> String {
    if breakdown.is_zero() {
        return "Select an event type and guest count to see an estimate.".to_string();
    }

    let mut out = String::from("Quote estimate\n");
    let rows = [
        ("Base cost", amount(breakdown.base_cost)),
        ("Services", amount(breakdown.service_cost)),
        ("Location adjustment", amount(breakdown.location_adjustment)),
        ("Seasonal adjustment", amount(breakdown.seasonal_adjustment)),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<20} {value:>12}").unwrap();
    }
    write!(out, "  {:<20} {:>12}", "Total", format_currency(breakdown.total)).unwrap();
    out
}

fn notification_line(notification: &Notification) -> String {
    let mut line = format!(
        "{} {} {}",
        kind_marker(notification.kind),
        notification.id,
        notification
            .title
            .as_deref()
            .unwrap_or(notification.kind.default_title()),
    );
    if let Some(message) = &notification.message {
        write!(line, ": {message}").unwrap();
    }
    write!(line, " ({})", format_lifetime(notification)).unwrap();
    if let Some(action) = &notification.action {
        write!(line, " [{}]", action.label).unwrap();
    }
    line
}

/// Renders the notification stack. Bottom-anchored stacks print their
/// header last so the newest entry sits next to it.
pub fn notifications(list: &[Notification], position: NotificationPosition) -> String {
    if list.is_empty() {
        return "No notifications.".to_string();
    }

    let header = format!("Notifications ({})", position_label(position));
    let lines = list.iter().map(notification_line);
    let mut out: Vec<String> = Vec::with_capacity(list.len() + 1);
    if position.is_bottom() {
        out.extend(lines);
        out.push(header);
    } else {
        out.push(header);
        out.extend(lines);
    }
    out.join("\n")
}

fn position_label(position: NotificationPosition) -> &'static str {
    match position {
        NotificationPosition::TopRight => "top right",
        NotificationPosition::TopLeft => "top left",
        NotificationPosition::TopCenter => "top center",
        NotificationPosition::BottomRight => "bottom right",
        NotificationPosition::BottomLeft => "bottom left",
        NotificationPosition::BottomCenter => "bottom center",
    }
}

pub fn field_errors(form: FormKind, errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return format!("The {form} form was not sent.");
    }

    let mut out = format!("The {form} form has problems:");
    for error in errors {
        write!(out, "\n  {error}").unwrap();
    }
    out
}

pub fn share_link(link: &ShareLink) -> String {
    format!("Open this link to share via {}:\n  {}", link.channel, link.url)
}

pub fn config(config: &Config) -> String {
    let mut out = String::new();
    writeln!(out, "{}", config.business.name).unwrap();
    writeln!(out, "  email:    {}", config.business.email).unwrap();
    writeln!(out, "  whatsapp: {}", config.business.whatsapp_number).unwrap();
    let missing = config.mail.missing_keys();
    if missing.is_empty() {
        write!(out, "  mail:     configured").unwrap();
    } else {
        write!(out, "  mail:     missing {}", missing.join(", ")).unwrap();
    }
    out
}

/// Renders the inquiry being drafted, listing only the filled-in fields.
pub fn draft(form: &InquiryForm) -> String {
    fn row(out: &mut String, label: &str, value: Option<String>) {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            write!(out, "\n  {label:<10} {value}").unwrap();
        }
    }

    let event = &form.event;
    let mut out = String::from("Inquiry draft");
    row(&mut out, "name", Some(form.name.clone()));
    row(&mut out, "email", Some(form.email.clone()));
    row(&mut out, "phone", Some(form.phone.clone()));
    row(&mut out, "event", event.event_type.map(|v| v.to_string()));
    row(&mut out, "date", event.event_date.map(|v| v.to_string()));
    row(&mut out, "guests", event.guest_bracket.map(|v| v.to_string()));
    row(&mut out, "location", event.location.map(|v| v.to_string()));
    row(&mut out, "duration", event.duration.map(|v| v.to_string()));
    let services: Vec<&str> = event.selected_services.iter().map(String::as_str).collect();
    row(&mut out, "services", Some(services.join(", ")));
    row(&mut out, "budget", Some(form.budget.clone()));
    row(&mut out, "message", Some(form.message.clone()));
    row(&mut out, "contact", Some(form.preferred_contact.to_string()));
    out
}
