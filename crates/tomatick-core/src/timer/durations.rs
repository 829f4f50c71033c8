//! Focus and break interval lengths.
//!
//! Both lengths are whole minutes and are always kept inside their bounds;
//! out-of-range adjustments are clamped rather than rejected. Focus lengths
//! additionally sit on the 5-minute grid.

use serde::{Deserialize, Serialize};

/// Minimum focus length in minutes.
pub const FOCUS_MIN: u32 = 5;
/// Maximum focus length in minutes.
pub const FOCUS_MAX: u32 = 60;
/// Step used by the `+`/`-` focus controls.
pub const FOCUS_STEP: i32 = 5;

/// Minimum break length in minutes.
pub const BREAK_MIN: u32 = 1;
/// Maximum break length in minutes.
pub const BREAK_MAX: u32 = 15;
/// Step used by the `+`/`-` break controls.
pub const BREAK_STEP: i32 = 1;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Configured interval lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDurations")]
pub struct Durations {
    focus_minutes: u32,
    break_minutes: u32,
}

/// Wire shape of [`Durations`]; deserialized values go through `new`.
#[derive(Deserialize)]
struct RawDurations {
    focus_minutes: u32,
    break_minutes: u32,
}

impl From<RawDurations> for Durations {
    fn from(raw: RawDurations) -> Self {
        Self::new(raw.focus_minutes, raw.break_minutes)
    }
}

impl Durations {
    /// Build from raw minute values, clamping each into its bounds and
    /// rounding focus to the nearest step.
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes: snap_focus(focus_minutes.clamp(FOCUS_MIN, FOCUS_MAX)),
            break_minutes: break_minutes.clamp(BREAK_MIN, BREAK_MAX),
        }
    }

    /// True when `minutes` is a focus length reachable through the controls.
    pub fn is_valid_focus(minutes: u32) -> bool {
        (FOCUS_MIN..=FOCUS_MAX).contains(&minutes) && minutes % FOCUS_STEP as u32 == 0
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn focus_secs(&self) -> u64 {
        u64::from(self.focus_minutes) * 60
    }

    pub fn break_secs(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }

    /// Shift the focus length by `delta` minutes. Returns the new value.
    pub fn adjust_focus(&mut self, delta: i32) -> u32 {
        self.focus_minutes =
            snap_focus(clamp_shift(self.focus_minutes, delta, FOCUS_MIN, FOCUS_MAX));
        self.focus_minutes
    }

    /// Shift the break length by `delta` minutes. Returns the new value.
    pub fn adjust_break(&mut self, delta: i32) -> u32 {
        self.break_minutes = clamp_shift(self.break_minutes, delta, BREAK_MIN, BREAK_MAX);
        self.break_minutes
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

// i64 so that i32::MIN / i32::MAX deltas cannot overflow.
fn clamp_shift(current: u32, delta: i32, min: u32, max: u32) -> u32 {
    let shifted = i64::from(current) + i64::from(delta);
    shifted.clamp(i64::from(min), i64::from(max)) as u32
}

// Bounds are multiples of the step, so rounding a clamped value stays in bounds.
fn snap_focus(minutes: u32) -> u32 {
    let step = FOCUS_STEP as u32;
    (minutes + step / 2) / step * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_25_and_5() {
        let d = Durations::default();
        assert_eq!(d.focus_minutes(), 25);
        assert_eq!(d.break_minutes(), 5);
        assert_eq!(d.focus_secs(), 1500);
        assert_eq!(d.break_secs(), 300);
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        let d = Durations::new(0, 99);
        assert_eq!(d.focus_minutes(), FOCUS_MIN);
        assert_eq!(d.break_minutes(), BREAK_MAX);
    }

    #[test]
    fn new_rounds_focus_to_step() {
        assert_eq!(Durations::new(7, 5).focus_minutes(), 5);
        assert_eq!(Durations::new(8, 5).focus_minutes(), 10);
        assert_eq!(Durations::new(58, 5).focus_minutes(), 60);
        assert!(Durations::is_valid_focus(25));
        assert!(!Durations::is_valid_focus(7));
        assert!(!Durations::is_valid_focus(65));
    }

    #[test]
    fn off_step_delta_lands_on_grid() {
        let mut d = Durations::default();
        assert_eq!(d.adjust_focus(3), 30);
        assert_eq!(d.adjust_focus(-1), 30);
    }

    #[test]
    fn deserialize_clamps_out_of_range_values() {
        let d: Durations =
            serde_json::from_str(r#"{"focus_minutes":0,"break_minutes":500}"#).unwrap();
        assert_eq!(d.focus_minutes(), FOCUS_MIN);
        assert_eq!(d.break_minutes(), BREAK_MAX);

        let d: Durations =
            serde_json::from_str(r#"{"focus_minutes":33,"break_minutes":3}"#).unwrap();
        assert_eq!(d.focus_minutes(), 35);
        assert_eq!(d.break_minutes(), 3);
    }

    #[test]
    fn focus_step_moves_by_five() {
        let mut d = Durations::default();
        assert_eq!(d.adjust_focus(FOCUS_STEP), 30);
        assert_eq!(d.adjust_focus(-FOCUS_STEP), 25);
    }

    #[test]
    fn large_deltas_clamp() {
        let mut d = Durations::default();
        assert_eq!(d.adjust_focus(100), 60);
        assert_eq!(d.adjust_break(-100), 1);
    }

    #[test]
    fn extreme_deltas_do_not_overflow() {
        let mut d = Durations::default();
        assert_eq!(d.adjust_focus(i32::MAX), FOCUS_MAX);
        assert_eq!(d.adjust_focus(i32::MIN), FOCUS_MIN);
        assert_eq!(d.adjust_break(i32::MAX), BREAK_MAX);
        assert_eq!(d.adjust_break(i32::MIN), BREAK_MIN);
    }

    proptest! {
        #[test]
        fn focus_stays_in_bounds(start in 0u32..200, deltas in prop::collection::vec(any::<i32>(), 0..20)) {
            let mut d = Durations::new(start, DEFAULT_BREAK_MINUTES);
            for delta in deltas {
                let v = d.adjust_focus(delta);
                prop_assert!(Durations::is_valid_focus(v));
            }
        }

        #[test]
        fn break_stays_in_bounds(start in 0u32..200, deltas in prop::collection::vec(any::<i32>(), 0..20)) {
            let mut d = Durations::new(DEFAULT_FOCUS_MINUTES, start);
            for delta in deltas {
                let v = d.adjust_break(delta);
                prop_assert!((BREAK_MIN..=BREAK_MAX).contains(&v));
            }
        }
    }
}
