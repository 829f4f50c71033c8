mod controller;
mod durations;
mod engine;
mod ports;
mod session;

pub use controller::Pomodoro;
pub use durations::{
    Durations, BREAK_MAX, BREAK_MIN, BREAK_STEP, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES,
    FOCUS_MAX, FOCUS_MIN, FOCUS_STEP,
};
pub use engine::{Snapshot, TimerEngine, TimerState};
pub use ports::{ManualTickSource, Notifier, NotifyError, SilentNotifier, TickSource};
pub use session::{Session, SessionKind};
