//! Quote estimation for event requests.
//!
//! This crate maps a structured [`PricingRequest`] (event type, guest bracket,
//! location, duration, add-on services and an optional date) to a
//! deterministic [`PricingBreakdown`]. It is pure: no I/O, no shared mutable
//! state, and it never fails. Incomplete requests produce a zero breakdown so
//! the estimate can be recomputed on every form change.
//!
//! The pricing tables live in a [`Catalog`], validated once on construction.
//! The built-in catalog is available through [`catalog::standard`].
//!
//! # Composition
//! - The base cost composes multiplicatively:
//!   `base * event_multiplier * guest_multiplier * duration_multiplier`.
//! - Services add their flat prices.
//! - Location and season apply as adjustments proportional to
//!   `base_cost + service_cost`.
//! - Only the final total is rounded to a whole currency unit.

pub mod catalog;
pub mod engine;
pub mod format;

pub use catalog::{
    Catalog, CatalogError, CatalogTables, EventDuration, EventRate, EventType, GuestBracket,
    Location, Season, SeasonRate, ServiceCategory, ServiceRate, UnknownLabel,
};
pub use engine::{PricingBreakdown, PricingRequest};
pub use format::{format_currency, share_text};

/// Computes a breakdown for `request` against the built-in catalog.
///
/// Shorthand for `catalog::standard().calculate(request)`.
pub fn calculate(request: &PricingRequest) -> PricingBreakdown {
    catalog::standard().calculate(request)
}
