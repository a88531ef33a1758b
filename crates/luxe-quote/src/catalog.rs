//! Immutable pricing tables and their validation.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Error returned when a display label matches no catalog option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{label}`")]
pub struct UnknownLabel {
    /// Which kind of option was being parsed (e.g. "event type").
    pub kind: &'static str,
    /// The label as supplied by the caller.
    pub label: String,
}

/// Declares a closed set of options, each identified by its display label.
///
/// The label is used for parsing, display and serialization, so a request
/// coming from a form deserializes from the same strings the form shows.
macro_rules! labeled_options {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every option, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the display label of this option.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        label: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_options! {
    /// Kind of event being planned.
    EventType, "event type" {
        Wedding => "Wedding",
        BirthdayParty => "Birthday Party",
        CorporateEvent => "Corporate Event",
        BabyShower => "Baby Shower",
        Anniversary => "Anniversary",
        Graduation => "Graduation",
        Engagement => "Engagement",
        Housewarming => "Housewarming",
        Other => "Other",
    }
}

labeled_options! {
    /// Guest count range. Variants are declared from smallest to largest, so
    /// the derived ordering is the bracket ordering.
    GuestBracket, "guest bracket" {
        UpTo25 => "1-25",
        UpTo50 => "26-50",
        UpTo100 => "51-100",
        UpTo200 => "101-200",
        UpTo300 => "201-300",
        Over300 => "300+",
    }
}

labeled_options! {
    /// City where the event takes place.
    Location, "location" {
        Lagos => "Lagos",
        Abuja => "Abuja",
        PortHarcourt => "Port Harcourt",
        Kano => "Kano",
        Ibadan => "Ibadan",
        Enugu => "Enugu",
        Kaduna => "Kaduna",
        Other => "Other",
    }
}

labeled_options! {
    /// How long the event runs.
    EventDuration, "duration" {
        HalfDay => "2-4 hours",
        Standard => "4-6 hours",
        Extended => "6-8 hours",
        FullDay => "Full day",
        MultipleDays => "Multiple days",
    }
}

labeled_options! {
    /// Seasonal pricing bucket derived from the event month.
    Season, "season" {
        Peak => "peak",
        High => "high",
        Standard => "standard",
    }
}

labeled_options! {
    /// Grouping used when listing add-on services.
    ServiceCategory, "service category" {
        Decoration => "decoration",
        Technical => "technical",
        Media => "media",
        Coordination => "coordination",
        Service => "service",
    }
}

/// Base amount and multiplier for an event type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRate {
    pub base: f64,
    pub multiplier: f64,
}

/// A flat-priced add-on service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRate {
    /// Catalog key, also shown to the user.
    pub name: String,
    pub price: f64,
    pub category: ServiceCategory,
    /// Whether the service is highlighted as a recommended default.
    pub essential: bool,
}

/// Multiplier applied to events held in the listed months (1-12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRate {
    pub season: Season,
    pub multiplier: f64,
    pub months: Vec<u32>,
}

/// Errors detected while validating pricing tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A multiplier is zero, negative, or not finite.
    #[error("multiplier for {entry} must be a positive number, got {value}")]
    InvalidMultiplier { entry: String, value: f64 },
    /// A base amount or service price is negative or not finite.
    #[error("amount for {entry} must be a non-negative number, got {value}")]
    InvalidAmount { entry: String, value: f64 },
    /// The same option appears twice in one table.
    #[error("{entry} is listed more than once")]
    DuplicateEntry { entry: String },
    /// An event type or guest bracket has no row.
    #[error("{entry} has no pricing entry")]
    MissingEntry { entry: String },
    /// A larger guest bracket is cheaper than a smaller one.
    #[error("guest bracket {bracket} has a smaller multiplier than the bracket before it")]
    DecreasingGuestMultiplier { bracket: GuestBracket },
    /// A month is outside 1-12, uncovered, or claimed by two seasons.
    #[error("month {month} must belong to exactly one season")]
    SeasonMonth { month: u32 },
}

/// Raw pricing tables, as authored. Turned into a [`Catalog`] by
/// [`Catalog::new`], which validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTables {
    pub event_types: Vec<(EventType, EventRate)>,
    pub guest_brackets: Vec<(GuestBracket, f64)>,
    pub locations: Vec<(Location, f64)>,
    pub durations: Vec<(EventDuration, f64)>,
    pub services: Vec<ServiceRate>,
    pub seasons: Vec<SeasonRate>,
}

impl CatalogTables {
    /// The tables the business quotes with.
    pub fn standard() -> Self {
        let event = |base, multiplier| EventRate { base, multiplier };
        let service = |name: &str, price, category, essential| ServiceRate {
            name: name.to_string(),
            price,
            category,
            essential,
        };

        Self {
            event_types: vec![
                (EventType::Wedding, event(5000.0, 1.8)),
                (EventType::BirthdayParty, event(2000.0, 1.2)),
                (EventType::CorporateEvent, event(6000.0, 2.0)),
                (EventType::BabyShower, event(1500.0, 1.0)),
                (EventType::Anniversary, event(3000.0, 1.4)),
                (EventType::Graduation, event(1800.0, 1.1)),
                (EventType::Engagement, event(3500.0, 1.6)),
                (EventType::Housewarming, event(2200.0, 1.3)),
                (EventType::Other, event(2500.0, 1.2)),
            ],
            guest_brackets: vec![
                (GuestBracket::UpTo25, 0.8),
                (GuestBracket::UpTo50, 1.0),
                (GuestBracket::UpTo100, 1.4),
                (GuestBracket::UpTo200, 1.8),
                (GuestBracket::UpTo300, 2.3),
                (GuestBracket::Over300, 2.8),
            ],
            locations: vec![
                (Location::Lagos, 1.3),
                (Location::Abuja, 1.2),
                (Location::PortHarcourt, 1.1),
                (Location::Kano, 0.9),
                (Location::Ibadan, 0.95),
                (Location::Enugu, 1.0),
                (Location::Kaduna, 0.9),
                (Location::Other, 1.0),
            ],
            durations: vec![
                (EventDuration::HalfDay, 0.8),
                (EventDuration::Standard, 1.0),
                (EventDuration::Extended, 1.3),
                (EventDuration::FullDay, 1.6),
                (EventDuration::MultipleDays, 2.5),
            ],
            services: vec![
                service("Balloon Decorations", 30000.0, ServiceCategory::Decoration, true),
                service("Floral Arrangements", 45000.0, ServiceCategory::Decoration, true),
                service("Backdrop Design", 25000.0, ServiceCategory::Decoration, false),
                service("Table Settings", 20000.0, ServiceCategory::Decoration, false),
                service("Lighting Setup", 40000.0, ServiceCategory::Technical, false),
                service("Sound System", 35000.0, ServiceCategory::Technical, false),
                service("Photography", 100000.0, ServiceCategory::Media, false),
                service("Videography", 120000.0, ServiceCategory::Media, false),
                service("Catering Coordination", 80000.0, ServiceCategory::Coordination, false),
                service("Event Coordination", 150000.0, ServiceCategory::Coordination, true),
                service("Cleanup Service", 25000.0, ServiceCategory::Service, false),
                service("Security Coordination", 60000.0, ServiceCategory::Service, false),
            ],
            seasons: vec![
                SeasonRate {
                    season: Season::Peak,
                    multiplier: 1.2,
                    months: vec![11, 12, 1, 2],
                },
                SeasonRate {
                    season: Season::High,
                    multiplier: 1.1,
                    months: vec![3, 4, 10],
                },
                SeasonRate {
                    season: Season::Standard,
                    multiplier: 1.0,
                    months: vec![5, 6, 7, 8, 9],
                },
            ],
        }
    }
}

/// Validated, read-only pricing tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    event_types: BTreeMap<EventType, EventRate>,
    guest_brackets: BTreeMap<GuestBracket, f64>,
    locations: BTreeMap<Location, f64>,
    durations: BTreeMap<EventDuration, f64>,
    services: BTreeMap<String, ServiceRate>,
    // indexed by month - 1
    seasons: [(Season, f64); 12],
}

static STANDARD: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(CatalogTables::standard()).expect("built-in pricing catalog must be valid")
});

/// Returns the built-in catalog, building and validating it on first use.
pub fn standard() -> &'static Catalog {
    &STANDARD
}

fn check_multiplier(entry: impl fmt::Display, value: f64) -> Result<f64, CatalogError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CatalogError::InvalidMultiplier {
            entry: entry.to_string(),
            value,
        })
    }
}

fn check_amount(entry: impl fmt::Display, value: f64) -> Result<f64, CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CatalogError::InvalidAmount {
            entry: entry.to_string(),
            value,
        })
    }
}

fn insert_unique<K: Ord + fmt::Display, V>(
    map: &mut BTreeMap<K, V>,
    key: K,
    value: V,
) -> Result<(), CatalogError> {
    if map.contains_key(&key) {
        return Err(CatalogError::DuplicateEntry {
            entry: key.to_string(),
        });
    }
    map.insert(key, value);
    Ok(())
}

fn multiplier_table<K: Ord + Copy + fmt::Display>(
    rows: Vec<(K, f64)>,
) -> Result<BTreeMap<K, f64>, CatalogError> {
    let mut table = BTreeMap::new();
    for (key, multiplier) in rows {
        insert_unique(&mut table, key, check_multiplier(key, multiplier)?)?;
    }
    Ok(table)
}

impl Catalog {
    /// Validates `tables` and builds a catalog from them.
    ///
    /// Every event type and guest bracket must be priced, guest multipliers
    /// must not decrease as brackets grow, and each month must belong to
    /// exactly one season. Locations and durations may be partial; missing
    /// ones price at a multiplier of 1.0.
    pub fn new(tables: CatalogTables) -> Result<Self, CatalogError> {
        let mut event_types = BTreeMap::new();
        for (event, rate) in tables.event_types {
            check_amount(event, rate.base)?;
            check_multiplier(event, rate.multiplier)?;
            insert_unique(&mut event_types, event, rate)?;
        }
        if let Some(missing) = EventType::ALL.iter().find(|e| !event_types.contains_key(*e)) {
            return Err(CatalogError::MissingEntry {
                entry: missing.to_string(),
            });
        }

        let guest_brackets = multiplier_table(tables.guest_brackets)?;
        if let Some(missing) = GuestBracket::ALL
            .iter()
            .find(|b| !guest_brackets.contains_key(*b))
        {
            return Err(CatalogError::MissingEntry {
                entry: missing.to_string(),
            });
        }
        // BTreeMap iterates in bracket order
        let mut previous = 0.0;
        for (bracket, multiplier) in &guest_brackets {
            if *multiplier < previous {
                return Err(CatalogError::DecreasingGuestMultiplier { bracket: *bracket });
            }
            previous = *multiplier;
        }

        let locations = multiplier_table(tables.locations)?;
        let durations = multiplier_table(tables.durations)?;

        let mut services = BTreeMap::new();
        for service in tables.services {
            check_amount(&service.name, service.price)?;
            insert_unique(&mut services, service.name.clone(), service)?;
        }

        let mut months: [Option<(Season, f64)>; 12] = [None; 12];
        for rate in tables.seasons {
            let multiplier = check_multiplier(rate.season, rate.multiplier)?;
            for month in rate.months {
                let slot = month
                    .checked_sub(1)
                    .and_then(|index| months.get_mut(index as usize))
                    .ok_or(CatalogError::SeasonMonth { month })?;
                if slot.is_some() {
                    return Err(CatalogError::SeasonMonth { month });
                }
                *slot = Some((rate.season, multiplier));
            }
        }
        let mut seasons = [(Season::Standard, 1.0); 12];
        for (index, slot) in months.iter().enumerate() {
            seasons[index] = slot.ok_or(CatalogError::SeasonMonth {
                month: index as u32 + 1,
            })?;
        }

        Ok(Self {
            event_types,
            guest_brackets,
            locations,
            durations,
            services,
            seasons,
        })
    }

    /// Base amount and multiplier for `event`.
    pub fn event_rate(&self, event: EventType) -> Option<EventRate> {
        self.event_types.get(&event).copied()
    }

    /// Multiplier for `bracket`.
    pub fn guest_multiplier(&self, bracket: GuestBracket) -> Option<f64> {
        self.guest_brackets.get(&bracket).copied()
    }

    /// Multiplier for `location`; 1.0 when absent or not priced.
    pub fn location_multiplier(&self, location: Option<Location>) -> f64 {
        location
            .and_then(|location| self.locations.get(&location).copied())
            .unwrap_or(1.0)
    }

    /// Multiplier for `duration`; 1.0 when absent or not priced.
    pub fn duration_multiplier(&self, duration: Option<EventDuration>) -> f64 {
        duration
            .and_then(|duration| self.durations.get(&duration).copied())
            .unwrap_or(1.0)
    }

    /// Flat price of the service named `name`, if it is in the catalog.
    pub fn service_price(&self, name: &str) -> Option<f64> {
        self.services.get(name).map(|service| service.price)
    }

    /// All services, sorted by name.
    pub fn services(&self) -> impl Iterator<Item = &ServiceRate> {
        self.services.values()
    }

    /// Season bucket and multiplier for an event held on `date`.
    pub fn season_for(&self, date: NaiveDate) -> (Season, f64) {
        self.seasons[date.month0() as usize]
    }

    /// Seasonal multiplier for an optional event date; 1.0 when absent.
    pub fn seasonal_multiplier(&self, date: Option<NaiveDate>) -> f64 {
        date.map_or(1.0, |date| self.season_for(date).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_valid() {
        assert!(Catalog::new(CatalogTables::standard()).is_ok());
        assert_eq!(
            standard().event_rate(EventType::Wedding),
            Some(EventRate {
                base: 5000.0,
                multiplier: 1.8
            })
        );
    }

    #[test]
    fn labels_parse_back_to_options() {
        for event in EventType::ALL {
            assert_eq!(event.label().parse::<EventType>(), Ok(*event));
        }
        assert_eq!("port harcourt".parse::<Location>(), Ok(Location::PortHarcourt));
        assert_eq!("300+".parse::<GuestBracket>(), Ok(GuestBracket::Over300));
    }

    #[test]
    fn unknown_label_is_reported() {
        let err = "Bar Mitzvah".parse::<EventType>().unwrap_err();
        assert_eq!(err.kind, "event type");
        assert_eq!(err.to_string(), "unknown event type `Bar Mitzvah`");
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let mut tables = CatalogTables::standard();
        tables.locations[0].1 = 0.0;

        assert_eq!(
            Catalog::new(tables),
            Err(CatalogError::InvalidMultiplier {
                entry: "Lagos".into(),
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_service_price_is_rejected() {
        let mut tables = CatalogTables::standard();
        tables.services[0].price = -1.0;

        assert!(matches!(
            Catalog::new(tables),
            Err(CatalogError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn decreasing_guest_multipliers_are_rejected() {
        let mut tables = CatalogTables::standard();
        tables.guest_brackets[3].1 = 1.0;

        assert_eq!(
            Catalog::new(tables),
            Err(CatalogError::DecreasingGuestMultiplier {
                bracket: GuestBracket::UpTo200
            })
        );
    }

    #[test]
    fn missing_event_type_is_rejected() {
        let mut tables = CatalogTables::standard();
        tables.event_types.retain(|(event, _)| *event != EventType::Other);

        assert_eq!(
            Catalog::new(tables),
            Err(CatalogError::MissingEntry {
                entry: "Other".into()
            })
        );
    }

    #[test]
    fn duplicate_service_is_rejected() {
        let mut tables = CatalogTables::standard();
        let first = tables.services[0].clone();
        tables.services.push(first);

        assert_eq!(
            Catalog::new(tables),
            Err(CatalogError::DuplicateEntry {
                entry: "Balloon Decorations".into()
            })
        );
    }

    #[test]
    fn every_month_needs_exactly_one_season() {
        let mut uncovered = CatalogTables::standard();
        uncovered.seasons[2].months.retain(|month| *month != 7);
        assert_eq!(
            Catalog::new(uncovered),
            Err(CatalogError::SeasonMonth { month: 7 })
        );

        let mut doubled = CatalogTables::standard();
        doubled.seasons[1].months.push(12);
        assert_eq!(
            Catalog::new(doubled),
            Err(CatalogError::SeasonMonth { month: 12 })
        );

        let mut out_of_range = CatalogTables::standard();
        out_of_range.seasons[0].months.push(13);
        assert_eq!(
            Catalog::new(out_of_range),
            Err(CatalogError::SeasonMonth { month: 13 })
        );
    }

    #[test]
    fn seasons_follow_the_calendar() {
        let catalog = standard();
        let date = |month| NaiveDate::from_ymd_opt(2026, month, 15).unwrap();

        assert_eq!(catalog.season_for(date(12)), (Season::Peak, 1.2));
        assert_eq!(catalog.season_for(date(4)), (Season::High, 1.1));
        assert_eq!(catalog.season_for(date(7)), (Season::Standard, 1.0));
        assert_eq!(catalog.seasonal_multiplier(None), 1.0);
    }

    #[test]
    fn unpriced_location_and_duration_default_to_one() {
        let catalog = standard();
        assert_eq!(catalog.location_multiplier(None), 1.0);
        assert_eq!(catalog.duration_multiplier(None), 1.0);
        assert_eq!(catalog.location_multiplier(Some(Location::Lagos)), 1.3);
    }

    #[test]
    fn other_event_sits_inside_the_listed_range() {
        let catalog = standard();
        let other = catalog.event_rate(EventType::Other).unwrap();
        assert_eq!(other, EventRate { base: 2500.0, multiplier: 1.2 });

        let listed: Vec<EventRate> = EventType::ALL
            .iter()
            .filter(|event| **event != EventType::Other)
            .filter_map(|event| catalog.event_rate(*event))
            .collect();
        assert!(listed.iter().any(|rate| rate.base < other.base));
        assert!(listed.iter().any(|rate| rate.base > other.base));
        assert!(listed.iter().any(|rate| rate.multiplier < other.multiplier));
        assert!(listed.iter().any(|rate| rate.multiplier > other.multiplier));
    }
}
