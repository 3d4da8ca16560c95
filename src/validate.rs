//! Per-step field validation.
//!
//! Validation is data, never an error: a blocked transition carries the
//! list of missing field ids, which callers resolve to labels via the
//! config label table. Two addressing schemes appear in the output:
//! dotted component paths (`components.stage.status`) and bracket-indexed
//! list entries (`venues[2].name`).

use crate::config::Config;
use crate::record::{EventRecord, LocationNeeded, LocationPreference, LocationType, VenueStatus};
use crate::wizard::Step;

/// Minimum length for a production-sourced location description
pub const MIN_LOCATION_DESCRIPTION_CHARS: usize = 50;

/// Outcome of validating one step against the in-progress record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    /// Raw field ids that are absent or malformed, in rule order
    pub missing: Vec<String>,
}

impl StepValidation {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// Resolve the missing field ids to human-readable labels
    pub fn labels(&self, config: &Config) -> Vec<String> {
        self.missing.iter().map(|f| config.label_for(f)).collect()
    }
}

/// Validate the given step against the record. Pure; never mutates and
/// never fails.
pub fn validate(step: Step, record: &EventRecord, config: &Config) -> StepValidation {
    let mut missing = Vec::new();

    for field in config.required_fields(step.key()) {
        if !record.has_field(field) {
            missing.push(field.clone());
        }
    }

    match step {
        Step::VenueInfo => validate_venue_step(record, &mut missing),
        Step::Components => validate_components_step(record, &mut missing),
        Step::BasicInfo | Step::Finalize => {}
    }

    StepValidation { missing }
}

/// Venue step rules branch on event type: online-content events answer the
/// location block, everything else the venue block.
fn validate_venue_step(record: &EventRecord, missing: &mut Vec<String>) {
    if record.is_online() {
        validate_location_block(record, missing);
    } else {
        validate_venue_block(record, missing);
    }
}

fn validate_location_block(record: &EventRecord, missing: &mut Vec<String>) {
    let Some(needed) = record.location_needed else {
        missing.push("location_needed".to_string());
        return;
    };
    if needed != LocationNeeded::Required {
        return;
    }

    let Some(location_type) = record.location_type else {
        missing.push("location_type".to_string());
        return;
    };
    if location_type != LocationType::ProductionSourced {
        return;
    }

    // Production scouts the location: the preferred setting must be
    // described in enough detail to brief a scout.
    match record.location_preference {
        None => missing.push("location_preference".to_string()),
        Some(LocationPreference::Indoor) => {
            if !description_long_enough(&record.indoor_location_description) {
                missing.push("indoor_location_description".to_string());
            }
        }
        Some(LocationPreference::Outdoor) => {
            if !description_long_enough(&record.outdoor_location_description) {
                missing.push("outdoor_location_description".to_string());
            }
        }
    }
}

fn description_long_enough(description: &Option<String>) -> bool {
    description
        .as_deref()
        .is_some_and(|d| d.trim().chars().count() >= MIN_LOCATION_DESCRIPTION_CHARS)
}

fn validate_venue_block(record: &EventRecord, missing: &mut Vec<String>) {
    let Some(status) = record.venue_status else {
        missing.push("venue_status".to_string());
        return;
    };

    if status == VenueStatus::Unknown {
        if !record.has_field("desired_region") {
            missing.push("desired_region".to_string());
        }
        return;
    }

    if record.venues.is_empty() {
        missing.push("venues".to_string());
        return;
    }
    for (i, venue) in record.venues.iter().enumerate() {
        if venue.name.trim().is_empty() {
            missing.push(format!("venues[{i}].name"));
        }
        if venue.address.trim().is_empty() {
            missing.push(format!("venues[{i}].address"));
        }
    }
}

/// Every selected category must carry a component entry with a set status
/// and at least one line item.
fn validate_components_step(record: &EventRecord, missing: &mut Vec<String>) {
    for category in &record.selected_categories {
        match record.components.get(category) {
            None => {
                missing.push(format!("components.{category}.status"));
                missing.push(format!("components.{category}.items"));
            }
            Some(component) => {
                if component.status.is_none() {
                    missing.push(format!("components.{category}.status"));
                }
                if component.items.is_empty() {
                    missing.push(format!("components.{category}.items"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ComponentRecord, ComponentStatus, EventType, LineItem, Venue};
    use chrono::NaiveDate;

    fn make_valid_basic_record() -> EventRecord {
        EventRecord {
            event_name: Some("Launch".to_string()),
            organizer: Some("Acme".to_string()),
            event_type: Some(EventType::Conference),
            contract_type: Some("prime".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 2),
            ..EventRecord::default()
        }
    }

    #[test]
    fn test_basic_info_reports_every_missing_required_field() {
        let config = Config::default();
        let record = EventRecord::default();

        let result = validate(Step::BasicInfo, &record, &config);
        assert!(!result.is_valid());
        for field in config.required_fields("basic_info") {
            assert!(
                result.missing.contains(field),
                "{field} should be reported missing"
            );
        }
    }

    #[test]
    fn test_basic_info_valid_when_filled() {
        let config = Config::default();
        let record = make_valid_basic_record();

        let result = validate(Step::BasicInfo, &record, &config);
        assert!(result.is_valid(), "unexpected missing: {:?}", result.missing);
    }

    #[test]
    fn test_short_indoor_description_is_flagged() {
        let config = Config::default();
        let record = EventRecord {
            event_type: Some(EventType::OnlineContent),
            location_needed: Some(LocationNeeded::Required),
            location_type: Some(LocationType::ProductionSourced),
            location_preference: Some(LocationPreference::Indoor),
            indoor_location_description: Some("short".to_string()),
            ..EventRecord::default()
        };

        let result = validate(Step::VenueInfo, &record, &config);
        assert!(!result.is_valid());
        assert_eq!(result.missing, vec!["indoor_location_description"]);
    }

    #[test]
    fn test_long_indoor_description_passes() {
        let config = Config::default();
        let record = EventRecord {
            event_type: Some(EventType::OnlineContent),
            location_needed: Some(LocationNeeded::Required),
            location_type: Some(LocationType::ProductionSourced),
            location_preference: Some(LocationPreference::Indoor),
            indoor_location_description: Some("x".repeat(MIN_LOCATION_DESCRIPTION_CHARS)),
            ..EventRecord::default()
        };

        let result = validate(Step::VenueInfo, &record, &config);
        assert!(result.is_valid(), "unexpected missing: {:?}", result.missing);
    }

    #[test]
    fn test_client_provided_location_needs_no_description() {
        let config = Config::default();
        let record = EventRecord {
            event_type: Some(EventType::OnlineContent),
            location_needed: Some(LocationNeeded::Required),
            location_type: Some(LocationType::ClientProvided),
            ..EventRecord::default()
        };

        let result = validate(Step::VenueInfo, &record, &config);
        assert!(result.is_valid());
    }

    #[test]
    fn test_unknown_venue_requires_region() {
        let config = Config::default();
        let mut record = EventRecord {
            event_type: Some(EventType::Exhibition),
            venue_status: Some(VenueStatus::Unknown),
            ..EventRecord::default()
        };

        let result = validate(Step::VenueInfo, &record, &config);
        assert_eq!(result.missing, vec!["desired_region"]);

        record.desired_region = Some("Kanto".to_string());
        assert!(validate(Step::VenueInfo, &record, &config).is_valid());
    }

    #[test]
    fn test_known_venue_status_with_empty_list_reports_venues() {
        let config = Config::default();
        let record = EventRecord {
            event_type: Some(EventType::Exhibition),
            venue_status: Some(VenueStatus::Undetermined),
            ..EventRecord::default()
        };

        let result = validate(Step::VenueInfo, &record, &config);
        assert_eq!(result.missing, vec!["venues"]);
    }

    #[test]
    fn test_venue_entries_reported_per_index() {
        let config = Config::default();
        let record = EventRecord {
            event_type: Some(EventType::Exhibition),
            venue_status: Some(VenueStatus::Confirmed),
            venues: vec![
                Venue {
                    name: "Hall A".to_string(),
                    address: "1-2-3 Center St".to_string(),
                    note: None,
                },
                Venue::default(),
            ],
            ..EventRecord::default()
        };

        let result = validate(Step::VenueInfo, &record, &config);
        assert_eq!(result.missing, vec!["venues[1].name", "venues[1].address"]);
    }

    #[test]
    fn test_components_require_selection() {
        let config = Config::default();
        let record = EventRecord::default();

        let result = validate(Step::Components, &record, &config);
        assert_eq!(result.missing, vec!["selected_categories"]);
    }

    #[test]
    fn test_selected_category_without_entry_reports_dotted_paths() {
        let config = Config::default();
        let record = EventRecord {
            selected_categories: vec!["stage".to_string()],
            ..EventRecord::default()
        };

        let result = validate(Step::Components, &record, &config);
        assert_eq!(
            result.missing,
            vec!["components.stage.status", "components.stage.items"]
        );
    }

    #[test]
    fn test_complete_stage_component_is_valid() {
        let config = Config::default();
        let mut record = EventRecord {
            selected_categories: vec!["stage".to_string()],
            ..EventRecord::default()
        };
        record.components.insert(
            "stage".to_string(),
            ComponentRecord {
                status: Some(ComponentStatus::Confirmed),
                budget: 0,
                items: vec![LineItem {
                    name: "truss".to_string(),
                    quantity: 2,
                    unit: Some("set".to_string()),
                    price: None,
                }],
            },
        );

        let result = validate(Step::Components, &record, &config);
        assert!(result.is_valid());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_labels_resolve_both_addressing_schemes() {
        let config = Config::default();
        let validation = StepValidation {
            missing: vec![
                "venues[1].name".to_string(),
                "components.stage.status".to_string(),
                "event_name".to_string(),
            ],
        };

        let labels = validation.labels(&config);
        assert_eq!(
            labels,
            vec![
                "Venue name (entry 2)",
                "stage: Component status",
                "Event name"
            ]
        );
    }
}
