use clap::Args;
use serde::Serialize;
use tomatick_core::{
    Config, Event, ManualTickSource, Pomodoro, SilentNotifier, Snapshot, TickSource, TimerEngine,
};

use super::resolve_durations;

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of one-second ticks to deliver after starting
    #[arg(long, default_value = "0")]
    ticks: u64,
    /// Focus length in minutes (defaults to config)
    #[arg(long)]
    focus: Option<u32>,
    /// Break length in minutes (defaults to config)
    #[arg(long = "break")]
    break_minutes: Option<u32>,
    /// Pause once this many ticks have been delivered; later ticks are dropped
    #[arg(long)]
    pause_at: Option<u64>,
}

#[derive(Serialize)]
struct SimulationReport {
    #[serde(flatten)]
    snapshot: Snapshot,
    ticks_delivered: u64,
    notifications: u64,
    completions: Vec<Event>,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let durations = resolve_durations(&config, args.focus, args.break_minutes);
    let mut pomodoro = Pomodoro::new(
        TimerEngine::new(durations),
        ManualTickSource::new(),
        SilentNotifier,
    );

    pomodoro.toggle_play_pause();

    let mut delivered = 0;
    let mut completions = Vec::new();
    for i in 0..args.ticks {
        if args.pause_at == Some(i) {
            pomodoro.toggle_play_pause();
        }
        if !pomodoro.tick_source().is_armed() {
            break;
        }
        completions.extend(pomodoro.on_tick());
        delivered += 1;
    }
    if args.pause_at == Some(args.ticks) && pomodoro.state().is_running() {
        pomodoro.toggle_play_pause();
    }

    let report = SimulationReport {
        snapshot: pomodoro.snapshot(),
        ticks_delivered: delivered,
        notifications: pomodoro.notifications(),
        completions,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
