use std::fmt::Write;

use crate::engine::{PricingBreakdown, PricingRequest};

/// Symbol of the currency quotes are given in (Nigerian Naira).
const CURRENCY_SYMBOL: &str = "₦";

/// Placeholder shown for fields the customer has not filled in yet.
const NOT_SPECIFIED: &str = "Not specified";

/// Formats a whole-unit amount with the currency symbol and thousands
/// separators, e.g. `₦55,380`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);

    if amount < 0 {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    out
}

/// Builds the plain-text quote summary customers can forward to others.
pub fn share_text(
    business_name: &str,
    request: &PricingRequest,
    breakdown: &PricingBreakdown,
) -> String {
    fn or_placeholder(value: Option<impl ToString>) -> String {
        value.map_or_else(|| NOT_SPECIFIED.to_string(), |value| value.to_string())
    }

    let mut out = String::new();
    writeln!(out, "Event Quote from {business_name}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Event: {}", or_placeholder(request.event_type)).unwrap();
    writeln!(out, "Guests: {}", or_placeholder(request.guest_bracket)).unwrap();
    writeln!(out, "Location: {}", or_placeholder(request.location)).unwrap();
    if let Some(date) = request.event_date {
        writeln!(out, "Date: {}", date.format("%B %-d, %Y")).unwrap();
    }
    if !request.selected_services.is_empty() {
        let services: Vec<&str> = request
            .selected_services
            .iter()
            .map(String::as_str)
            .collect();
        writeln!(out, "Services: {}", services.join(", ")).unwrap();
    }
    write!(out, "Estimated Cost: {}", format_currency(breakdown.total)).unwrap();

    out
}
