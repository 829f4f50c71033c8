//! Host wiring for the engine.
//!
//! [`Pomodoro`] owns a [`TimerEngine`], keeps the tick source armed exactly
//! while the timer runs, and forwards session completions to the notifier.

use super::engine::{Snapshot, TimerEngine, TimerState};
use super::ports::{Notifier, TickSource};
use crate::events::Event;

pub struct Pomodoro<T, N> {
    engine: TimerEngine,
    ticks: T,
    notifier: N,
    notifications: u64,
}

impl<T: TickSource, N: Notifier> Pomodoro<T, N> {
    pub fn new(engine: TimerEngine, ticks: T, notifier: N) -> Self {
        let mut pomodoro = Self {
            engine,
            ticks,
            notifier,
            notifications: 0,
        };
        pomodoro.sync_tick_source();
        pomodoro
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn tick_source_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Completions handed to the notifier so far.
    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    pub fn toggle_play_pause(&mut self) -> Option<Event> {
        let event = self.engine.toggle_play_pause();
        self.sync_tick_source();
        event
    }

    /// Entry point for the tick source.
    pub fn on_tick(&mut self) -> Option<Event> {
        let event = self.engine.tick()?;
        if let Event::SessionCompleted { completed, .. } = &event {
            self.notifications += 1;
            if let Err(e) = self.notifier.notify(*completed) {
                tracing::debug!(error = %e, "notifier failed; ignoring");
            }
        }
        Some(event)
    }

    pub fn stop(&mut self) -> Option<Event> {
        let event = self.engine.stop();
        self.sync_tick_source();
        event
    }

    pub fn adjust_focus_duration(&mut self, delta: i32) -> Option<Event> {
        self.engine.adjust_focus_duration(delta)
    }

    pub fn adjust_break_duration(&mut self, delta: i32) -> Option<Event> {
        self.engine.adjust_break_duration(delta)
    }

    pub fn into_parts(self) -> (TimerEngine, T, N) {
        (self.engine, self.ticks, self.notifier)
    }

    fn sync_tick_source(&mut self) {
        let running = self.engine.is_running();
        match (running, self.ticks.is_armed()) {
            (true, false) => {
                tracing::debug!("arming tick source");
                self.ticks.arm();
            }
            (false, true) => {
                tracing::debug!("disarming tick source");
                self.ticks.disarm();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::timer::ports::{ManualTickSource, NotifyError};
    use crate::timer::{Durations, SessionKind};

    #[derive(Default)]
    struct CountingNotifier {
        calls: Cell<u32>,
        fail: bool,
    }

    impl Notifier for CountingNotifier {
        fn notify(&self, _completed: SessionKind) -> Result<(), NotifyError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err("speaker unplugged".into());
            }
            Ok(())
        }
    }

    fn pomodoro(focus: u32, brk: u32) -> Pomodoro<ManualTickSource, CountingNotifier> {
        Pomodoro::new(
            TimerEngine::new(Durations::new(focus, brk)),
            ManualTickSource::new(),
            CountingNotifier::default(),
        )
    }

    #[test]
    fn tick_source_follows_running_flag() {
        let mut p = pomodoro(25, 5);
        assert!(!p.tick_source().is_armed());

        p.toggle_play_pause();
        assert!(p.tick_source().is_armed());

        p.toggle_play_pause();
        assert!(!p.tick_source().is_armed());

        p.toggle_play_pause();
        assert!(p.tick_source().is_armed());
        assert_eq!(p.tick_source().arm_count(), 2);

        p.stop();
        assert!(!p.tick_source().is_armed());
        p.stop();
        assert_eq!(p.tick_source().disarm_count(), 2);
    }

    #[test]
    fn adjusting_does_not_touch_tick_source() {
        let mut p = pomodoro(25, 5);
        p.adjust_focus_duration(5);
        p.adjust_break_duration(1);
        assert_eq!(p.tick_source().arm_count(), 0);
        assert_eq!(p.state().focus_minutes(), 30);
        assert_eq!(p.state().break_minutes(), 6);
    }

    #[test]
    fn completion_notifies_exactly_once() {
        let mut p = pomodoro(5, 1);
        p.toggle_play_pause();
        for _ in 0..300 {
            assert!(p.on_tick().is_none());
        }
        assert_eq!(p.notifier().calls.get(), 0);

        assert!(p.on_tick().unwrap().is_completion());
        assert_eq!(p.notifier().calls.get(), 1);
        assert_eq!(p.notifications(), 1);
        assert_eq!(p.state().session().unwrap().kind, SessionKind::OnBreak);
    }

    #[test]
    fn notifier_failure_is_swallowed() {
        let mut p = Pomodoro::new(
            TimerEngine::new(Durations::new(5, 1)),
            ManualTickSource::new(),
            CountingNotifier {
                fail: true,
                ..Default::default()
            },
        );
        p.toggle_play_pause();
        for _ in 0..301 {
            p.on_tick();
        }
        assert_eq!(p.notifier().calls.get(), 1);
        let session = p.state().session().unwrap();
        assert_eq!(session.kind, SessionKind::OnBreak);
        assert_eq!(session.remaining_secs, 60);
    }

    #[test]
    fn starting_armed_engine_arms_source() {
        let mut engine = TimerEngine::default();
        engine.toggle_play_pause();
        let p = Pomodoro::new(engine, ManualTickSource::new(), CountingNotifier::default());
        assert!(p.tick_source().is_armed());
    }
}
