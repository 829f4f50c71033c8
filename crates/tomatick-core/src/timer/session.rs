use serde::{Deserialize, Serialize};

use super::durations::Durations;

/// Kind of interval a session represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Focusing,
    OnBreak,
}

impl SessionKind {
    /// Human-readable label as shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Focusing => "Focusing",
            SessionKind::OnBreak => "On Break",
        }
    }

    /// The kind that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            SessionKind::Focusing => SessionKind::OnBreak,
            SessionKind::OnBreak => SessionKind::Focusing,
        }
    }

    /// Configured length of this kind, in minutes.
    pub fn minutes(self, durations: &Durations) -> u32 {
        match self {
            SessionKind::Focusing => durations.focus_minutes(),
            SessionKind::OnBreak => durations.break_minutes(),
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous Focusing or On Break interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub kind: SessionKind,
    /// Seconds left; never negative.
    pub remaining_secs: u64,
    /// Length the session was created with.
    pub total_secs: u64,
}

impl Session {
    /// A fresh session of `kind` sized from the current durations.
    pub fn start(kind: SessionKind, durations: &Durations) -> Self {
        let total_secs = u64::from(kind.minutes(durations)) * 60;
        Self {
            kind,
            remaining_secs: total_secs,
            total_secs,
        }
    }

    /// The session that replaces this one once it runs out.
    pub fn successor(&self, durations: &Durations) -> Self {
        Self::start(self.kind.next(), durations)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    /// 0.0 .. 100.0 elapsed share of the session.
    pub fn progress_pct(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        let remaining = self.remaining_secs.min(self.total_secs) as f64;
        100.0 - remaining / self.total_secs as f64 * 100.0
    }
}
