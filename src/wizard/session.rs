//! One user's wizard session: an owned record plus the step pointer.
//!
//! The session is passed explicitly through every handler call; there is
//! no ambient shared state. Persistence is a separate explicit action, not
//! a side effect of stepping.

use crate::config::Config;
use crate::record::EventRecord;
use crate::store::{EventStore, StoreError};
use crate::validate::{self, StepValidation};
use crate::wizard::{Step, Transition};

/// Tracks wizard progress for one in-progress event record
pub struct WizardSession {
    config: Config,
    step: Step,
    record: EventRecord,
}

impl WizardSession {
    /// Start a fresh session with an empty record at step 0
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            step: Step::BasicInfo,
            record: EventRecord::default(),
        }
    }

    /// Resume a session over a previously stored record
    pub fn resume(config: &Config, record: EventRecord) -> Self {
        Self {
            config: config.clone(),
            step: Step::BasicInfo,
            record,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    /// Field edits go through the caller mutating the record directly
    pub fn record_mut(&mut self) -> &mut EventRecord {
        &mut self.record
    }

    pub fn into_record(self) -> EventRecord {
        self.record
    }

    /// Validate the current step without moving
    pub fn validate_current(&self) -> StepValidation {
        validate::validate(self.step, &self.record, &self.config)
    }

    /// Advance to the next step, gated by the validator. Online-content
    /// events skip the venue step (0 lands on 2).
    pub fn go_next(&mut self) -> Transition {
        let validation = self.validate_current();
        if !validation.is_valid() {
            tracing::debug!(
                step = %self.step,
                missing = ?validation.missing,
                "transition blocked by missing fields"
            );
            return Transition::Blocked {
                missing: validation.missing,
            };
        }

        let to = if self.record.is_online() && self.step == Step::BasicInfo {
            Step::Components
        } else if self.step.is_final() {
            // Terminal step: stay put
            self.step
        } else {
            Step::from_index(self.step.index() + 1)
        };

        tracing::debug!(from = %self.step, to = %to, "wizard advanced");
        self.step = to;
        Transition::Moved { to }
    }

    /// Go back one step; never validates. Online-content events skip the
    /// venue step in reverse (2 lands on 0).
    pub fn go_previous(&mut self) -> Transition {
        let to = if self.record.is_online() && self.step == Step::Components {
            Step::BasicInfo
        } else {
            Step::from_index(self.step.index().saturating_sub(1))
        };

        tracing::debug!(from = %self.step, to = %to, "wizard went back");
        self.step = to;
        Transition::Moved { to }
    }

    /// Jump directly to a step (step-picker control). Out-of-range indices
    /// clamp, and the online-content skip remaps past the venue step.
    pub fn go_to(&mut self, index: usize) -> Transition {
        let mut to = Step::from_index(index.min(Step::COUNT - 1));
        if self.record.is_online() && to == Step::VenueInfo {
            to = Step::Components;
        }

        tracing::debug!(from = %self.step, to = %to, "wizard jumped");
        self.step = to;
        Transition::Moved { to }
    }

    /// Persist the record; assigns an id on first save
    pub fn save_to(&mut self, store: &mut EventStore) -> Result<i64, StoreError> {
        store.save(&mut self.record)
    }

    /// Format step progress for display, like "[basic info] > venue info > ..."
    pub fn format_progress(&self) -> String {
        Step::all()
            .iter()
            .map(|s| {
                if *s == self.step {
                    format!("[{s}]")
                } else {
                    s.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Format as percentage complete
    pub fn percentage_complete(&self) -> u8 {
        ((self.step.index() as f32 / Step::COUNT as f32) * 100.0) as u8
    }
}
