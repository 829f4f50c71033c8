//! Interactive terminal host.
//!
//! One current-thread runtime multiplexes the tick interval and stdin, so
//! every handler runs to completion before the next input is looked at.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tomatick_core::timer::{NotifyError, BREAK_STEP, FOCUS_STEP};
use tomatick_core::{
    minutes_to_duration, Config, Event, Notifier, Pomodoro, SessionKind, SilentNotifier,
    TickSource, TimerEngine, TimerState,
};

use super::resolve_durations;

const BAR_WIDTH: usize = 20;

const HELP: &str = "commands: p (play/pause), s (stop), f+ / f- (focus), b+ / b- (break), ? (status), q (quit)";

#[derive(Args)]
pub struct RunArgs {
    /// Focus length in minutes (defaults to config)
    #[arg(long)]
    focus: Option<u32>,
    /// Break length in minutes (defaults to config)
    #[arg(long = "break")]
    break_minutes: Option<u32>,
    /// Milliseconds per tick (defaults to config)
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Do not ring the terminal bell when a session ends
    #[arg(long)]
    no_bell: bool,
}

/// Tick source backed by a tokio interval. Disarming drops the interval;
/// arming builds a new one so the first tick is a full period away.
pub struct IntervalTickSource {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTickSource {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Resolves on the next tick; never resolves while disarmed.
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTickSource {
    fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

/// Rings the terminal bell.
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify(&self, _completed: SessionKind) -> Result<(), NotifyError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    PlayPause,
    Stop,
    Focus(i32),
    Break(i32),
    Status,
    Quit,
}

impl Control {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "p" | "play" | "pause" => Some(Control::PlayPause),
            "s" | "stop" => Some(Control::Stop),
            "f+" => Some(Control::Focus(FOCUS_STEP)),
            "f-" => Some(Control::Focus(-FOCUS_STEP)),
            "b+" => Some(Control::Break(BREAK_STEP)),
            "b-" => Some(Control::Break(-BREAK_STEP)),
            "?" | "status" => Some(Control::Status),
            "q" | "quit" | "exit" => Some(Control::Quit),
            _ => None,
        }
    }
}

type Host = Pomodoro<IntervalTickSource, Box<dyn Notifier>>;

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let durations = resolve_durations(&config, args.focus, args.break_minutes);
    let period = Duration::from_millis(args.tick_ms.unwrap_or(config.tick_interval_ms).max(1));

    let notifier: Box<dyn Notifier> =
        if config.notifications.enabled && config.notifications.bell && !args.no_bell {
            Box::new(BellNotifier)
        } else {
            Box::new(SilentNotifier)
        };

    let pomodoro = Pomodoro::new(
        TimerEngine::new(durations),
        IntervalTickSource::new(period),
        notifier,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(event_loop(pomodoro));
    // The stdin reader sits on a blocking thread until the next line.
    runtime.shutdown_background();
    result
}

async fn event_loop(mut pomodoro: Host) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("{HELP}");
    println!("{}", status_line(pomodoro.state()));

    loop {
        tokio::select! {
            _ = pomodoro.tick_source_mut().next_tick() => {
                if let Some(Event::SessionCompleted { completed, next, .. }) = pomodoro.on_tick() {
                    println!("{} finished, {} begins", completed, next.kind);
                }
                println!("{}", status_line(pomodoro.state()));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match Control::parse(&line) {
                    Some(Control::Quit) => break,
                    Some(control) => {
                        apply(&mut pomodoro, control);
                        println!("{}", status_line(pomodoro.state()));
                    }
                    None => eprintln!("unknown command '{}'; {HELP}", line.trim()),
                }
            }
        }
    }

    pomodoro.stop();
    Ok(())
}

fn apply(pomodoro: &mut Host, control: Control) {
    let event = match control {
        Control::PlayPause => pomodoro.toggle_play_pause(),
        Control::Stop => pomodoro.stop(),
        Control::Focus(delta) => pomodoro.adjust_focus_duration(delta),
        Control::Break(delta) => pomodoro.adjust_break_duration(delta),
        Control::Status | Control::Quit => None,
    };
    if let Some(event) = event {
        tracing::debug!(?event, "applied control");
    }
}

/// One-line rendering of the timer for the terminal.
fn status_line(state: &TimerState) -> String {
    let (Some(session), Some(title), Some(remaining)) =
        (state.session(), state.title(), state.subtitle())
    else {
        return format!(
            "Stopped | focus {} | break {}",
            minutes_to_duration(state.focus_minutes()),
            minutes_to_duration(state.break_minutes())
        );
    };

    let pct = session.progress_pct();
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled.min(BAR_WIDTH)),
        "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    );

    let mut line = format!("{title} | {remaining} | [{bar}] {pct:.0}%");
    if !state.is_running() {
        line.push_str(" [PAUSED]");
    }
    line
}
