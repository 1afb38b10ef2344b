//! attack-sim: headless attacker run against a scripted player.
//!
//! Usage:
//!   attack-sim --seconds 120 --seed 7
//!   attack-sim --config tuning.json --snapshot
//!   RUST_LOG=dartrun_sim=debug attack-sim --no-counter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::DVec2;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dartrun_core::commands::{AttackerCommand, CounterEvent};
use dartrun_core::config::AttackerConfig;
use dartrun_core::constants::{FRAME_BUDGET_MS, TICK_RATE};
use dartrun_core::enums::{AttackPhase, CounterOutcome};
use dartrun_core::events::AudioCue;
use dartrun_core::state::{AttackerSnapshot, TickContext};
use dartrun_core::types::Bounds;
use dartrun_sim::clock::ManualClock;
use dartrun_sim::AttackerEngine;

/// Horizontal position of the scripted player.
const PLAYER_X: f64 = 120.0;
const PLAYER_RADIUS: f64 = 20.0;
/// Bobbing period of the scripted player.
const BOB_PERIOD_MS: f64 = 3_000.0;
/// Run speed in px per ms.
const RUN_SPEED: f64 = 0.3;

#[derive(Debug, Parser)]
#[command(name = "attack-sim", version, about = "Headless attacker run against a scripted player")]
struct Args {
    /// Seconds of play to simulate.
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// RNG seed. Overrides the seed in `--config`.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Level of the player's countering creature.
    #[arg(long, default_value_t = 10)]
    level: u32,

    /// Attack stat of the player's countering creature.
    #[arg(long, default_value_t = 60)]
    attack: i32,

    /// Bobbing amplitude as a fraction of screen height.
    #[arg(long, default_value_t = 0.35)]
    bob: f64,

    /// Never counter; every dart flies at the player.
    #[arg(long)]
    no_counter: bool,

    /// Print the final snapshot instead of the run summary.
    #[arg(long)]
    snapshot: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Counts gathered over a run.
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    simulated_ms: f64,
    waves: u32,
    attacks: u32,
    launches: u32,
    hits: u32,
    counters: CounterTally,
}

#[derive(Debug, Default, Serialize)]
struct CounterTally {
    knocked_back: u32,
    repelled: u32,
    destroyed: u32,
    immune: u32,
    ignored: u32,
}

impl CounterTally {
    fn record(&mut self, outcome: CounterOutcome) {
        match outcome {
            CounterOutcome::KnockedBack => self.knocked_back += 1,
            CounterOutcome::Repelled => self.repelled += 1,
            CounterOutcome::Destroyed => self.destroyed += 1,
            CounterOutcome::Immune => self.immune += 1,
            CounterOutcome::Ignored => self.ignored += 1,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => match AttackerConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => AttackerConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let bounds = Bounds::new(args.width, args.height);
    let (summary, last) = run(&args, config, bounds);

    let json = if args.snapshot {
        serde_json::to_string_pretty(&last)
    } else {
        serde_json::to_string_pretty(&summary)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Player centre at `now`: a fixed column bobbing around mid-screen.
fn player_center(now: f64, amplitude: f64, bounds: Bounds) -> DVec2 {
    let phase = now / BOB_PERIOD_MS * std::f64::consts::TAU;
    let y = bounds.height * (0.5 + amplitude * phase.sin());
    DVec2::new(PLAYER_X, y)
}

/// Drive the engine at the nominal frame rate for `args.seconds`.
fn run(args: &Args, config: AttackerConfig, bounds: Bounds) -> (RunSummary, AttackerSnapshot) {
    let frames = (args.seconds.max(0.0) * f64::from(TICK_RATE)).round() as u64;
    let counter = CounterEvent {
        pokemon_level: args.level,
        pokemon_attack_stat: args.attack,
        is_legendary: false,
    };

    let mut summary = RunSummary {
        seed: config.seed,
        ..Default::default()
    };
    let clock = ManualClock::new();
    let mut engine = AttackerEngine::with_clock(config, clock.clone());
    engine.queue_command(AttackerCommand::Start { bounds });

    let mut distance = 0.0;
    let mut was_in_range = false;
    let mut last = engine.snapshot();

    for _ in 0..frames {
        clock.advance(FRAME_BUDGET_MS);
        distance += RUN_SPEED * FRAME_BUDGET_MS;
        let now = summary.simulated_ms + FRAME_BUDGET_MS;
        let player = player_center(now, args.bob, bounds);

        let ctx = TickContext {
            distance_traveled: distance,
            ..TickContext::new(FRAME_BUDGET_MS, player.y, bounds)
        };
        let snap = engine.tick(&ctx);

        if snap.phase == AttackPhase::Tracking && last.phase == AttackPhase::Idle {
            summary.attacks += 1;
        }
        summary.launches += snap
            .audio_cues
            .iter()
            .filter(|cue| matches!(cue, AudioCue::Launch))
            .count() as u32;
        for outcome in &snap.counter_outcomes {
            summary.counters.record(*outcome);
        }

        // Counter on entering the danger zone.
        let in_range = engine.in_danger_range(player);
        if in_range && !was_in_range && !args.no_counter {
            engine.queue_command(AttackerCommand::Counter(counter));
        }
        was_in_range = in_range;

        if engine.check_hit(player, PLAYER_RADIUS) {
            tracing::info!(at_ms = now, y = player.y, "player hit");
            summary.hits += 1;
            engine.queue_command(AttackerCommand::Reset);
        }

        summary.frames += 1;
        summary.simulated_ms = now;
        summary.waves = snap.wave_number;
        last = snap;
    }

    (summary, last)
}
