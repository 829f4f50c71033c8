//! Session timer engine.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or read the clock - the host delivers one `tick()` per elapsed
//! second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --toggle--> Focusing(F*60)
//! Focusing(r>0) --tick--> Focusing(r-1)
//! Focusing(0)   --tick--> OnBreak(B*60)   [+ completion]
//! OnBreak(r>0)  --tick--> OnBreak(r-1)
//! OnBreak(0)    --tick--> Focusing(F*60)  [+ completion]
//! any --stop--> Idle
//! any --toggle--> same session, running flipped
//! ```
//!
//! ## Usage
//!
//! ```
//! use tomatick_core::timer::{Durations, TimerEngine};
//!
//! let mut engine = TimerEngine::new(Durations::default());
//! engine.toggle_play_pause();
//! // Once per second while running:
//! let completed = engine.tick(); // Some(Event::SessionCompleted) on rollover
//! assert!(completed.is_none());
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::durations::Durations;
use super::session::{Session, SessionKind};
use crate::events::{DurationField, Event};
use crate::format::{minutes_to_duration, seconds_to_duration};

/// The whole timer state as one value.
///
/// Transitions are pure: each returns the next state and leaves `self`
/// untouched. [`TimerEngine`] is the only owner that swaps states in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    is_running: bool,
    session: Option<Session>,
    durations: Durations,
}

impl TimerState {
    pub fn idle(durations: Durations) -> Self {
        Self {
            is_running: false,
            session: None,
            durations,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn focus_minutes(&self) -> u32 {
        self.durations.focus_minutes()
    }

    pub fn break_minutes(&self) -> u32 {
        self.durations.break_minutes()
    }

    /// No session exists (never started, or stopped).
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// "Focusing for 25:00 minutes", using the configured length of the
    /// current kind.
    pub fn title(&self) -> Option<String> {
        let kind = self.session?.kind;
        Some(format!(
            "{} for {} minutes",
            kind.label(),
            minutes_to_duration(kind.minutes(&self.durations))
        ))
    }

    /// "24:59 remaining".
    pub fn subtitle(&self) -> Option<String> {
        let session = self.session?;
        Some(format!(
            "{} remaining",
            seconds_to_duration(session.remaining_secs)
        ))
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Flip the running flag. Starting from idle opens a focus session;
    /// a paused session resumes untouched.
    pub fn toggled(self) -> Self {
        let is_running = !self.is_running;
        let session = match (is_running, self.session) {
            (true, None) => Some(Session::start(SessionKind::Focusing, &self.durations)),
            (_, existing) => existing,
        };
        Self {
            is_running,
            session,
            ..self
        }
    }

    /// Advance by one second. Returns the new state and, when a session
    /// rolled over, the kind that just finished.
    ///
    /// Returns `None` without a running session.
    pub fn ticked(self) -> Option<(Self, Option<SessionKind>)> {
        let session = self.session.filter(|_| self.is_running)?;

        if session.is_finished() {
            let next = Self {
                session: Some(session.successor(&self.durations)),
                ..self
            };
            return Some((next, Some(session.kind)));
        }

        let next = Self {
            session: Some(Session {
                remaining_secs: session.remaining_secs.saturating_sub(1),
                ..session
            }),
            ..self
        };
        Some((next, None))
    }

    pub fn stopped(self) -> Self {
        Self::idle(self.durations)
    }

    pub fn with_focus_adjusted(mut self, delta: i32) -> Self {
        self.durations.adjust_focus(delta);
        self
    }

    pub fn with_break_adjusted(mut self, delta: i32) -> Self {
        self.durations.adjust_break(delta);
        self
    }
}

/// Serializable read model for presenters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub is_running: bool,
    pub session: Option<Session>,
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub title: Option<String>,
    pub remaining: Option<String>,
    /// 0.0 .. 100.0 elapsed share of the current session.
    pub progress_pct: f64,
}

impl From<&TimerState> for Snapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            is_running: state.is_running,
            session: state.session,
            focus_minutes: state.focus_minutes(),
            break_minutes: state.break_minutes(),
            title: state.title(),
            remaining: state.subtitle(),
            progress_pct: state.session.map(|s| s.progress_pct()).unwrap_or(0.0),
        }
    }
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Create an idle engine with the given interval lengths.
    pub fn new(durations: Durations) -> Self {
        Self {
            state: TimerState::idle(durations),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.snapshot(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn toggle_play_pause(&mut self) -> Option<Event> {
        let was_idle = self.state.is_idle();
        self.state = self.state.toggled();
        let at = Utc::now();

        if !self.state.is_running() {
            tracing::debug!(session = ?self.state.session, "timer paused");
            return Some(Event::TimerPaused {
                session: self.state.session,
                at,
            });
        }

        let session = self.state.session?;
        if was_idle {
            tracing::debug!(remaining_secs = session.remaining_secs, "timer started");
            Some(Event::TimerStarted { session, at })
        } else {
            tracing::debug!(remaining_secs = session.remaining_secs, "timer resumed");
            Some(Event::TimerResumed { session, at })
        }
    }

    /// Call once per elapsed second while running.
    /// Returns `Some(Event::SessionCompleted)` when a session rolls over.
    pub fn tick(&mut self) -> Option<Event> {
        let Some((next, completed)) = self.state.ticked() else {
            tracing::warn!(
                running = self.state.is_running(),
                idle = self.state.is_idle(),
                "tick delivered without a running session; ignored"
            );
            return None;
        };
        self.state = next;

        let completed = completed?;
        let next = self.state.session?;
        tracing::info!(
            completed = %completed,
            next = %next.kind,
            next_secs = next.remaining_secs,
            "session completed"
        );
        Some(Event::SessionCompleted {
            completed,
            next,
            at: Utc::now(),
        })
    }

    /// Drop the current session and halt. Safe to call repeatedly.
    pub fn stop(&mut self) -> Option<Event> {
        self.state = self.state.stopped();
        tracing::debug!("timer stopped");
        Some(Event::TimerStopped { at: Utc::now() })
    }

    /// Shift the focus length. Only future sessions see the change.
    /// Returns `None` when the value is already at the bound.
    pub fn adjust_focus_duration(&mut self, delta: i32) -> Option<Event> {
        let before = self.state.focus_minutes();
        self.state = self.state.with_focus_adjusted(delta);
        let minutes = self.state.focus_minutes();
        (minutes != before).then(|| {
            tracing::debug!(minutes, "focus duration adjusted");
            Event::DurationAdjusted {
                field: DurationField::Focus,
                minutes,
                at: Utc::now(),
            }
        })
    }

    /// Shift the break length. Only future sessions see the change.
    pub fn adjust_break_duration(&mut self, delta: i32) -> Option<Event> {
        let before = self.state.break_minutes();
        self.state = self.state.with_break_adjusted(delta);
        let minutes = self.state.break_minutes();
        (minutes != before).then(|| {
            tracing::debug!(minutes, "break duration adjusted");
            Event::DurationAdjusted {
                field: DurationField::Break,
                minutes,
                at: Utc::now(),
            }
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
