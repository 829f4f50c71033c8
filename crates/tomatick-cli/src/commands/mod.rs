pub mod config;
pub mod run;
pub mod simulate;

use tomatick_core::{Config, Durations};

/// Durations from config, overridden by any flags given.
pub(crate) fn resolve_durations(
    config: &Config,
    focus: Option<u32>,
    brk: Option<u32>,
) -> Durations {
    let base = config.durations();
    Durations::new(
        focus.unwrap_or(base.focus_minutes()),
        brk.unwrap_or(base.break_minutes()),
    )
}
