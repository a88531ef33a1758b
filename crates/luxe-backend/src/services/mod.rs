//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (mail delivery, notifications) and emit
//! responses back to the frontend.

pub mod config_service;
pub mod contact_service;
pub mod inquiry_service;
pub mod notification_service;
pub mod quote_service;
pub mod share_service;
mod submission;

#[cfg(test)]
pub(crate) mod testing;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;

/// The current local date, against which event dates are validated.
fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
