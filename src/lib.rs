//! Eventplan - step-wizard core for event planning with spreadsheet export
//!
//! The wizard state machine, per-step field validation, event persistence
//! and report generation live here; UI rendering stays with the caller.

pub mod config;
pub mod logging;
pub mod record;
pub mod report;
pub mod store;
pub mod validate;
pub mod wizard;
