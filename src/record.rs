//! Typed event record collected by the wizard.
//!
//! Every answer the wizard collects is a named optional field; "unset" is
//! `None`, never a sentinel value. The validator checks presence per step
//! via [`EventRecord::has_field`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of event being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Exhibition,
    Conference,
    Seminar,
    /// Streamed/recorded content with no audience venue
    OnlineContent,
}

impl EventType {
    /// Whether the venue-info step applies to this event type
    pub fn needs_venue(self) -> bool {
        self != EventType::OnlineContent
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EventType::Exhibition => "Exhibition",
            EventType::Conference => "Conference",
            EventType::Seminar => "Seminar",
            EventType::OnlineContent => "Online content",
        }
    }

    pub fn all() -> &'static [EventType] {
        &[
            EventType::Exhibition,
            EventType::Conference,
            EventType::Seminar,
            EventType::OnlineContent,
        ]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Whether the production needs to arrange a shooting location (online events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationNeeded {
    Required,
    NotNeeded,
}

/// Who sources the shooting location when one is required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Production scouts and books the location
    ProductionSourced,
    /// Client provides their own location
    ClientProvided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPreference {
    Indoor,
    Outdoor,
}

/// How confirmed the venue choice is (offline events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueStatus {
    Confirmed,
    Undetermined,
    /// No candidate yet, only a desired region
    Unknown,
}

impl VenueStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            VenueStatus::Confirmed => "Confirmed",
            VenueStatus::Undetermined => "Undetermined",
            VenueStatus::Unknown => "Region only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Confirmed,
    Undetermined,
}

impl ComponentStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            ComponentStatus::Confirmed => "Confirmed",
            ComponentStatus::Undetermined => "Undetermined",
        }
    }
}

/// One candidate or confirmed venue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// One purchasable unit within a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit: Option<String>,
    /// Unit price; total renders blank when unset
    #[serde(default)]
    pub price: Option<u64>,
}

impl LineItem {
    /// quantity x price, when a price is set
    pub fn amount(&self) -> Option<u64> {
        self.price.map(|p| p * u64::from(self.quantity))
    }
}

/// One service line (stage, sound, lighting, ...) with its own budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(default)]
    pub status: Option<ComponentStatus>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Contract-level budget section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetInfo {
    /// Total contract amount agreed with the client
    #[serde(default)]
    pub contract_amount: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The full set of answers collected for one event-planning session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Assigned by the store on first save
    #[serde(default)]
    pub id: Option<i64>,

    // Basic info
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub contract_type: Option<String>,

    // Schedule
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub setup_date: Option<NaiveDate>,
    #[serde(default)]
    pub teardown_date: Option<NaiveDate>,

    // Location block (online-content events)
    #[serde(default)]
    pub location_needed: Option<LocationNeeded>,
    #[serde(default)]
    pub location_type: Option<LocationType>,
    #[serde(default)]
    pub location_preference: Option<LocationPreference>,
    #[serde(default)]
    pub indoor_location_description: Option<String>,
    #[serde(default)]
    pub outdoor_location_description: Option<String>,

    // Venue block (offline events)
    #[serde(default)]
    pub venue_status: Option<VenueStatus>,
    #[serde(default)]
    pub desired_region: Option<String>,
    #[serde(default)]
    pub venues: Vec<Venue>,

    // Budget and service components
    #[serde(default)]
    pub budget: BudgetInfo,
    #[serde(default)]
    pub selected_categories: Vec<String>,
    #[serde(default)]
    pub components: BTreeMap<String, ComponentRecord>,
}

impl EventRecord {
    /// Name for display and report filenames
    pub fn display_name(&self) -> &str {
        self.event_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("(untitled event)")
    }

    /// Whether this is an online-content event (venue step is skipped)
    pub fn is_online(&self) -> bool {
        self.event_type == Some(EventType::OnlineContent)
    }

    /// Presence check for the table-driven required-field rules.
    ///
    /// A string field counts as present only when non-empty after trimming;
    /// list fields when non-empty. Unknown names are treated as present so
    /// a stale config table cannot block the wizard.
    pub fn has_field(&self, field: &str) -> bool {
        fn filled(s: &Option<String>) -> bool {
            s.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        match field {
            "event_name" => filled(&self.event_name),
            "organizer" => filled(&self.organizer),
            "event_type" => self.event_type.is_some(),
            "contract_type" => filled(&self.contract_type),
            "start_date" => self.start_date.is_some(),
            "end_date" => self.end_date.is_some(),
            "setup_date" => self.setup_date.is_some(),
            "teardown_date" => self.teardown_date.is_some(),
            "location_needed" => self.location_needed.is_some(),
            "location_type" => self.location_type.is_some(),
            "location_preference" => self.location_preference.is_some(),
            "indoor_location_description" => filled(&self.indoor_location_description),
            "outdoor_location_description" => filled(&self.outdoor_location_description),
            "venue_status" => self.venue_status.is_some(),
            "desired_region" => filled(&self.desired_region),
            "venues" => !self.venues.is_empty(),
            "contract_amount" => self.budget.contract_amount.is_some(),
            "selected_categories" => !self.selected_categories.is_empty(),
            _ => {
                tracing::debug!(field, "presence check for unknown field name");
                true
            }
        }
    }

    /// Sum of all component budgets
    pub fn component_budget_total(&self) -> u64 {
        self.components.values().map(|c| c.budget).sum()
    }

    /// Soft budget rule: warn (never block) when component budgets exceed
    /// the contract amount.
    pub fn budget_warning(&self) -> Option<String> {
        let contract = self.budget.contract_amount?;
        let total = self.component_budget_total();
        if total > contract {
            Some(format!(
                "Component budgets total {total}, exceeding the contract amount {contract}"
            ))
        } else {
            None
        }
    }
}
