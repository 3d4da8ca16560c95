//! Wizard state machine: the ordered step list and the session that walks it.

pub mod session;

pub use session::WizardSession;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One screen of the wizard, in fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    BasicInfo,
    VenueInfo,
    Components,
    Finalize,
}

impl Step {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [Step] {
        &[
            Step::BasicInfo,
            Step::VenueInfo,
            Step::Components,
            Step::Finalize,
        ]
    }

    pub fn index(self) -> usize {
        match self {
            Step::BasicInfo => 0,
            Step::VenueInfo => 1,
            Step::Components => 2,
            Step::Finalize => 3,
        }
    }

    /// Step for an index, clamped into range
    pub fn from_index(index: usize) -> Step {
        match index {
            0 => Step::BasicInfo,
            1 => Step::VenueInfo,
            2 => Step::Components,
            _ => Step::Finalize,
        }
    }

    /// Key into the required-field table and label data
    pub fn key(self) -> &'static str {
        match self {
            Step::BasicInfo => "basic_info",
            Step::VenueInfo => "venue_info",
            Step::Components => "components",
            Step::Finalize => "finalize",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Step::BasicInfo => "basic info",
            Step::VenueInfo => "venue info",
            Step::Components => "components",
            Step::Finalize => "finalize",
        }
    }

    pub fn is_final(self) -> bool {
        self == Step::Finalize
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of a requested transition. Blocked transitions never panic or
/// error; they carry the offending field ids for the caller to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { to: Step },
    Blocked { missing: Vec<String> },
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}
