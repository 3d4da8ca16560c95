//! Integration test for the full wizard flow:
//! session creation -> step transitions -> persistence -> report export.

use chrono::NaiveDate;
use tempfile::TempDir;

use eventplan::config::Config;
use eventplan::record::{
    ComponentRecord, ComponentStatus, EventType, LineItem, Venue, VenueStatus,
};
use eventplan::report;
use eventplan::store::EventStore;
use eventplan::wizard::{Step, Transition, WizardSession};

fn fill_basic_info(session: &mut WizardSession, event_type: EventType) {
    let record = session.record_mut();
    record.event_name = Some("Spring Launch".to_string());
    record.organizer = Some("Acme Events".to_string());
    record.event_type = Some(event_type);
    record.contract_type = Some("prime".to_string());
    record.start_date = NaiveDate::from_ymd_opt(2025, 4, 1);
    record.end_date = NaiveDate::from_ymd_opt(2025, 4, 2);
}

fn fill_stage_component(session: &mut WizardSession) {
    let record = session.record_mut();
    record.selected_categories = vec!["stage".to_string()];
    record.components.insert(
        "stage".to_string(),
        ComponentRecord {
            status: Some(ComponentStatus::Confirmed),
            budget: 4_000,
            items: vec![LineItem {
                name: "truss".to_string(),
                quantity: 2,
                unit: Some("set".to_string()),
                price: Some(300),
            }],
        },
    );
}

#[test]
fn offline_event_walks_every_step_and_exports() {
    let data_dir = TempDir::new().unwrap();
    let export_dir = TempDir::new().unwrap();
    let config = Config::default();
    let mut store = EventStore::open(data_dir.path()).unwrap();

    let mut session = WizardSession::new(&config);

    // Empty record: forward transition is blocked with field guidance
    let blocked = session.go_next();
    match &blocked {
        Transition::Blocked { missing } => {
            assert!(missing.contains(&"event_name".to_string()));
            assert!(missing.contains(&"start_date".to_string()));
        }
        Transition::Moved { .. } => panic!("empty record must not advance"),
    }
    assert_eq!(session.step(), Step::BasicInfo);

    fill_basic_info(&mut session, EventType::Exhibition);
    assert!(session.go_next().moved());
    assert_eq!(session.step(), Step::VenueInfo);

    // Venue step: confirmed status demands the venue list
    session.record_mut().venue_status = Some(VenueStatus::Confirmed);
    match session.go_next() {
        Transition::Blocked { missing } => assert_eq!(missing, vec!["venues"]),
        Transition::Moved { .. } => panic!("empty venue list must block"),
    }

    session.record_mut().venues.push(Venue {
        name: "Hall A".to_string(),
        address: "1-2-3 Center St".to_string(),
        note: None,
    });
    assert!(session.go_next().moved());
    assert_eq!(session.step(), Step::Components);

    fill_stage_component(&mut session);
    assert!(session.go_next().moved());
    assert_eq!(session.step(), Step::Finalize);

    session.record_mut().budget.contract_amount = Some(10_000);
    assert!(session.validate_current().is_valid());

    // Explicit save assigns an id
    let id = session.save_to(&mut store).unwrap();
    assert!(id > 0);

    // Reload and compare the full record
    let loaded = store.load(id);
    assert_eq!(&loaded, session.record());
    assert_eq!(loaded.start_date, NaiveDate::from_ymd_opt(2025, 4, 1));

    // Export produces the summary plus one workbook per category
    let paths = report::export_all(&loaded, export_dir.path()).unwrap();
    assert!(paths.summary.exists());
    assert_eq!(paths.categories.len(), 1);
    assert_eq!(&loaded, session.record(), "export must not mutate");
}

#[test]
fn online_event_skips_venue_step_both_directions() {
    let config = Config::default();
    let mut session = WizardSession::new(&config);
    fill_basic_info(&mut session, EventType::OnlineContent);

    assert_eq!(
        session.go_next(),
        Transition::Moved {
            to: Step::Components
        }
    );
    assert_eq!(session.step(), Step::Components, "step 1 is never visited");

    assert_eq!(
        session.go_previous(),
        Transition::Moved {
            to: Step::BasicInfo
        }
    );

    // Direct selection remaps past the venue step too
    session.go_to(1);
    assert_eq!(session.step(), Step::Components);
}

#[test]
fn saved_event_updates_in_place_on_second_save() {
    let data_dir = TempDir::new().unwrap();
    let config = Config::default();
    let mut store = EventStore::open(data_dir.path()).unwrap();

    let mut session = WizardSession::new(&config);
    fill_basic_info(&mut session, EventType::Seminar);

    let id = session.save_to(&mut store).unwrap();
    session.record_mut().event_name = Some("Spring Launch v2".to_string());
    let second = session.save_to(&mut store).unwrap();

    assert_eq!(second, id);
    assert_eq!(store.list_all().len(), 1);
    assert_eq!(
        store.load(id).event_name.as_deref(),
        Some("Spring Launch v2")
    );
}

#[test]
fn resumed_session_continues_from_stored_record() {
    let data_dir = TempDir::new().unwrap();
    let config = Config::default();
    let mut store = EventStore::open(data_dir.path()).unwrap();

    let mut session = WizardSession::new(&config);
    fill_basic_info(&mut session, EventType::Conference);
    let id = session.save_to(&mut store).unwrap();
    drop(session);

    let mut resumed = WizardSession::resume(&config, store.load(id));
    assert_eq!(resumed.step(), Step::BasicInfo);
    assert!(resumed.go_next().moved(), "stored answers still validate");
    assert_eq!(resumed.step(), Step::VenueInfo);
}
