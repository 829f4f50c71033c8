//! # Tomatick Core Library
//!
//! Core logic for the Tomatick Pomodoro timer: a session state machine that
//! alternates "Focusing" and "On Break" intervals, plus the contracts a host
//! needs to drive it.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. The caller delivers one
//!   `tick()` per elapsed second while the timer runs.
//! - **Ports**: [`TickSource`] and [`Notifier`] traits so the engine can be
//!   hosted by a real interval and sound, or by fakes in tests.
//! - **Controller**: [`Pomodoro`] arms/disarms the tick source from the
//!   running flag and forwards completions to the notifier.
//! - **Storage**: TOML-based configuration of interval lengths and alerts.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Pomodoro`]: Engine host wiring
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod format;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{DurationField, Event};
pub use format::{minutes_to_duration, seconds_to_duration};
pub use storage::Config;
pub use timer::{
    Durations, ManualTickSource, Notifier, Pomodoro, Session, SessionKind, SilentNotifier,
    Snapshot, TickSource, TimerEngine, TimerState,
};
