//! Collaborator contracts for the timer host.
//!
//! The engine itself never sleeps or plays sound. A host pairs it with a
//! [`TickSource`] that delivers one tick per elapsed second while armed and
//! a [`Notifier`] that raises an alert when a session runs out.

use super::session::SessionKind;

/// Error a notifier may report. The host logs and drops it.
pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

/// Periodic one-second trigger.
///
/// Must deliver no ticks while disarmed. `arm` starts a fresh period so
/// time spent paused never counts toward the next tick.
pub trait TickSource {
    fn arm(&mut self);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Audible alert raised when a session ends. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, completed: SessionKind) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, completed: SessionKind) -> Result<(), NotifyError> {
        (**self).notify(completed)
    }
}

/// Notifier that does nothing. Used when alerts are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _completed: SessionKind) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Tick source driven by hand: it only tracks the armed flag and the
/// caller delivers ticks itself. Used for deterministic replays.
#[derive(Debug, Default, Clone)]
pub struct ManualTickSource {
    armed: bool,
    arm_count: u32,
    disarm_count: u32,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the source has been armed.
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }

    pub fn disarm_count(&self) -> u32 {
        self.disarm_count
    }
}

impl TickSource for ManualTickSource {
    fn arm(&mut self) {
        self.armed = true;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.disarm_count += 1;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}
