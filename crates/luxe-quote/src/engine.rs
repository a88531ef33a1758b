use std::{collections::BTreeSet, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{Catalog, EventDuration, EventType, GuestBracket, Location};

/// Reads an optional field from loosely typed input, treating a value that
/// does not parse as absent instead of failing the whole request.
///
/// Meant for `#[serde(deserialize_with = "...")]` on `Option<T>` fields.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// Everything the engine needs to price an event.
///
/// All fields are optional so a half-filled form is still a valid request;
/// see [`Catalog::calculate`] for how missing pieces are priced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingRequest {
    #[serde(deserialize_with = "lenient")]
    pub event_type: Option<EventType>,
    #[serde(alias = "guestCount", deserialize_with = "lenient")]
    pub guest_bracket: Option<GuestBracket>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<Location>,
    #[serde(deserialize_with = "lenient")]
    pub duration: Option<EventDuration>,
    #[serde(deserialize_with = "lenient")]
    pub event_date: Option<NaiveDate>,
    /// Catalog keys of the add-on services. Names not in the catalog are
    /// ignored when pricing.
    #[serde(alias = "services")]
    pub selected_services: BTreeSet<String>,
}

impl PricingRequest {
    /// Starts a request with the two fields required for a non-zero quote.
    pub fn new(event_type: EventType, guest_bracket: GuestBracket) -> Self {
        Self {
            event_type: Some(event_type),
            guest_bracket: Some(guest_bracket),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn lasting(mut self, duration: EventDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.event_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>) -> Self {
        self.selected_services.insert(name.into());
        self
    }
}

/// Itemized estimate. Every component except `total` is kept unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub base_cost: f64,
    pub service_cost: f64,
    pub location_adjustment: f64,
    pub seasonal_adjustment: f64,
    /// Sum of the components, rounded to the nearest whole currency unit.
    pub total: i64,
}

impl PricingBreakdown {
    /// The breakdown of an incomplete request.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0
    }

    /// Base cost plus services, before location and seasonal adjustments.
    pub fn subtotal(&self) -> f64 {
        self.base_cost + self.service_cost
    }
}

impl Catalog {
    /// Prices `request`.
    ///
    /// Returns [`PricingBreakdown::zero`] when the event type or guest bracket
    /// is missing or not priced. Missing location, duration and date price at
    /// a multiplier of 1.0, and unknown service names contribute nothing.
    pub fn calculate(&self, request: &PricingRequest) -> PricingBreakdown {
        let Some(event) = request.event_type.and_then(|event| self.event_rate(event)) else {
            return PricingBreakdown::zero();
        };
        let Some(guests) = request
            .guest_bracket
            .and_then(|bracket| self.guest_multiplier(bracket))
        else {
            return PricingBreakdown::zero();
        };

        let base_cost =
            event.base * event.multiplier * guests * self.duration_multiplier(request.duration);
        let service_cost: f64 = request
            .selected_services
            .iter()
            .filter_map(|name| self.service_price(name))
            .sum();

        let subtotal = base_cost + service_cost;
        let location_adjustment = subtotal * (self.location_multiplier(request.location) - 1.0);
        let seasonal_adjustment = subtotal * (self.seasonal_multiplier(request.event_date) - 1.0);
        let total = base_cost + service_cost + location_adjustment + seasonal_adjustment;

        PricingBreakdown {
            base_cost,
            service_cost,
            location_adjustment,
            seasonal_adjustment,
            total: total.round() as i64,
        }
    }
}
