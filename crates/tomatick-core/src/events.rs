use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Session, SessionKind, Snapshot};

/// Which duration a `DurationAdjusted` event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationField {
    Focus,
    Break,
}

/// Every state change of the engine produces an Event.
/// Presenters render from them; the host reacts to completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Timer started from idle with a fresh focus session.
    TimerStarted {
        session: Session,
        at: DateTime<Utc>,
    },
    TimerPaused {
        session: Option<Session>,
        at: DateTime<Utc>,
    },
    TimerResumed {
        session: Session,
        at: DateTime<Utc>,
    },
    /// A session ran out and was replaced by the next one.
    SessionCompleted {
        completed: SessionKind,
        next: Session,
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    DurationAdjusted {
        field: DurationField,
        minutes: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        #[serde(flatten)]
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for events that should trigger an audible alert.
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. })
    }
}
