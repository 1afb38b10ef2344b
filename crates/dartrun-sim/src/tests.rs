//! Tests for the attacker engine, manager transforms, and snapshots.

use glam::DVec2;
use proptest::prelude::*;

use dartrun_core::commands::{AttackerCommand, CounterEvent};
use dartrun_core::components::AttackActor;
use dartrun_core::config::AttackerConfig;
use dartrun_core::constants::*;
use dartrun_core::enums::{AttackPhase, CounterOutcome, WavePhase};
use dartrun_core::events::AudioCue;
use dartrun_core::state::{AttackerSnapshot, TickContext};
use dartrun_core::types::Bounds;

use crate::clock::{Clock, ManualClock};
use crate::engine::AttackerEngine;
use crate::manager::{self, ManagerState};

const BOUNDS: Bounds = Bounds {
    width: 800.0,
    height: 600.0,
};

const DT: f64 = 16.0;

fn frame(dt: f64) -> TickContext {
    TickContext {
        dt,
        player_y: 250.0,
        bounds: BOUNDS,
        distance_traveled: WARMUP_DISTANCE + 1.0,
        score: 1200,
    }
}

/// Config whose first attack fires on the very first scheduler tick.
fn eager_config() -> AttackerConfig {
    let mut config = AttackerConfig::default();
    config.scheduler.first_attack_delay_min_ms = 0.0;
    config.scheduler.first_attack_delay_max_ms = 0.0;
    config
}

fn started_engine(config: AttackerConfig) -> (AttackerEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut engine = AttackerEngine::with_clock(config, clock.clone());
    engine.queue_command(AttackerCommand::Start { bounds: BOUNDS });
    (engine, clock)
}

fn step(engine: &mut AttackerEngine<ManualClock>, clock: &ManualClock, dt: f64) -> AttackerSnapshot {
    clock.advance(dt);
    engine.tick(&frame(dt))
}

/// Tick until the dart reaches `phase`, up to `limit` frames.
fn run_until(
    engine: &mut AttackerEngine<ManualClock>,
    clock: &ManualClock,
    phase: AttackPhase,
    limit: usize,
) -> Vec<AttackerSnapshot> {
    let mut snaps = Vec::new();
    for _ in 0..limit {
        let snap = step(engine, clock, DT);
        let done = snap.phase == phase;
        snaps.push(snap);
        if done {
            return snaps;
        }
    }
    panic!("dart never reached {phase:?} within {limit} frames");
}

fn firing_state(x: f64) -> ManagerState {
    let mut state = manager::start(BOUNDS);
    state.actor = AttackActor {
        phase: AttackPhase::Firing,
        position: DVec2::new(x, 200.0),
        ..AttackActor::idle(BOUNDS)
    };
    state
}

fn counter_event(level: u32, attack: i32) -> CounterEvent {
    CounterEvent {
        pokemon_level: level,
        pokemon_attack_stat: attack,
        is_legendary: false,
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let (mut engine_a, clock_a) = started_engine(AttackerConfig {
        seed: 12345,
        ..Default::default()
    });
    let (mut engine_b, clock_b) = started_engine(AttackerConfig {
        seed: 12345,
        ..Default::default()
    });

    for _ in 0..5_000 {
        let snap_a = step(&mut engine_a, &clock_a, DT);
        let snap_b = step(&mut engine_b, &clock_b, DT);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let (mut engine_a, clock_a) = started_engine(AttackerConfig {
        seed: 111,
        ..Default::default()
    });
    let (mut engine_b, clock_b) = started_engine(AttackerConfig {
        seed: 222,
        ..Default::default()
    });

    let mut diverged = false;
    for _ in 0..20_000 {
        let snap_a = step(&mut engine_a, &clock_a, DT);
        let snap_b = step(&mut engine_b, &clock_b, DT);
        if snap_a != snap_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent pacing");
}

// ---- Lifecycle ----

#[test]
fn test_inactive_engine_does_not_attack() {
    let clock = ManualClock::new();
    let mut engine = AttackerEngine::with_clock(eager_config(), clock.clone());
    for _ in 0..1_000 {
        let snap = step(&mut engine, &clock, DT);
        assert!(!snap.is_active);
        assert_eq!(snap.phase, AttackPhase::Idle);
    }
}

#[test]
fn test_first_frame_spawn_enters_tracking() {
    let (mut engine, clock) = started_engine(eager_config());
    let snap = engine.tick(&frame(DT));
    assert_eq!(clock.now_ms(), 0.0);
    assert!(snap.is_active);
    assert_eq!(snap.phase, AttackPhase::Tracking);
    assert_eq!(snap.position.x, BOUNDS.width - 40.0);
    assert_eq!(engine.state().actor.phase_timer, 0.0);
    assert_eq!(snap.wave_number, 1);
    assert_eq!(snap.wave_phase, WavePhase::Active);
}

#[test]
fn test_no_attack_before_warmup_distance() {
    let (mut engine, clock) = started_engine(eager_config());
    for _ in 0..500 {
        clock.advance(DT);
        let snap = engine.tick(&TickContext {
            distance_traveled: WARMUP_DISTANCE - 1.0,
            ..frame(DT)
        });
        assert_eq!(snap.phase, AttackPhase::Idle);
    }
    let snap = step(&mut engine, &clock, DT);
    assert_eq!(snap.phase, AttackPhase::Tracking);
}

#[test]
fn test_full_attack_cycle() {
    let (mut engine, clock) = started_engine(eager_config());
    let mut snaps = run_until(&mut engine, &clock, AttackPhase::Tracking, 10);
    snaps.extend(run_until(&mut engine, &clock, AttackPhase::Locked, 500));
    snaps.extend(run_until(&mut engine, &clock, AttackPhase::Firing, 500));
    snaps.extend(run_until(&mut engine, &clock, AttackPhase::Cooldown, 500));
    snaps.extend(run_until(&mut engine, &clock, AttackPhase::Idle, 500));

    let mut phases: Vec<AttackPhase> = snaps.iter().map(|s| s.phase).collect();
    phases.dedup();
    assert_eq!(
        phases,
        vec![
            AttackPhase::Tracking,
            AttackPhase::Locked,
            AttackPhase::Firing,
            AttackPhase::Cooldown,
            AttackPhase::Idle,
        ]
    );

    let cues: Vec<AudioCue> = snaps.iter().flat_map(|s| s.audio_cues.clone()).collect();
    assert_eq!(cues.iter().filter(|c| **c == AudioCue::LockOn).count(), 1);
    assert_eq!(cues.iter().filter(|c| **c == AudioCue::Launch).count(), 1);
    assert!(cues
        .iter()
        .any(|c| matches!(c, AudioCue::TrackingBeep { .. })));

    // Tracking chased the player.
    let locked = snaps
        .iter()
        .find(|s| s.phase == AttackPhase::Locked)
        .unwrap();
    assert!((locked.position.y - 250.0).abs() < 1.0);
    assert_eq!(engine.state().schedule.total_attacks, 1);
}

#[test]
fn test_zero_dt_ticks_change_nothing() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Firing, 500);
    let before = engine.state().clone();
    for _ in 0..100 {
        clock.advance(DT);
        let snap = engine.tick(&frame(0.0));
        assert!(snap.audio_cues.is_empty());
    }
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_negative_and_nan_dt_are_no_ops() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Tracking, 10);
    let before = engine.state().clone();
    engine.tick(&frame(-16.0));
    engine.tick(&frame(f64::NAN));
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_busy_time_is_credited_to_the_wave() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Tracking, 10);
    let wave_timer = engine.state().schedule.wave_timer;
    let snaps = run_until(&mut engine, &clock, AttackPhase::Idle, 1_000);
    let busy = snaps.len() as f64 * DT;
    assert_eq!(engine.state().unscheduled_ms, busy);
    assert_eq!(engine.state().schedule.wave_timer, wave_timer);

    step(&mut engine, &clock, DT);
    assert_eq!(engine.state().unscheduled_ms, 0.0);
    let expected = wave_timer - busy - DT;
    assert!((engine.state().schedule.wave_timer - expected).abs() < 1e-6);
}

#[test]
fn test_reset_returns_to_idle_and_keeps_schedule() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Firing, 500);
    engine.queue_command(AttackerCommand::Counter(counter_event(1, 50)));
    step(&mut engine, &clock, DT);
    let schedule = engine.state().schedule;

    engine.queue_command(AttackerCommand::Reset);
    engine.tick(&frame(0.0));
    let state = engine.state();
    assert_eq!(state.actor.phase, AttackPhase::Idle);
    assert!(!state.actor.knockback.immune);
    assert!(!state.actor.knockback.active);
    assert_eq!(state.actor.phase_timer, 0.0);
    assert!(state.last_counter_timestamp.is_none());
    assert!(state.is_active);
    assert_eq!(state.schedule, schedule);
}

#[test]
fn test_stop_deactivates() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Locked, 500);
    engine.queue_command(AttackerCommand::Stop);
    let snap = step(&mut engine, &clock, DT);
    assert!(!snap.is_active);
    assert_eq!(snap.phase, AttackPhase::Idle);
    for _ in 0..500 {
        assert_eq!(step(&mut engine, &clock, DT).phase, AttackPhase::Idle);
    }
}

// ---- Counters ----

#[test]
fn test_counter_scenario_knockback_and_slow_dart() {
    let config = AttackerConfig::default();
    let (state, outcome) = manager::counter(&firing_state(300.0), &counter_event(5, 70), 0.0, &config);
    assert_eq!(outcome, CounterOutcome::KnockedBack);
    assert_eq!(state.actor.knockback.target_x, 570.0_f64.min(BOUNDS.width - 40.0));
    assert!(state.actor.knockback.immune);
    assert_eq!(state.last_counter_timestamp, Some(0.0));

    // 600 ms of animation, snapping to 570.
    let mut scheduler = dartrun_attacker::scheduler::SpawnScheduler::new(
        config.scheduler.clone(),
        rand::rngs::mock::StepRng::new(0, 0),
    );
    let mut state = state;
    let mut now = 0.0;
    while state.actor.knockback.active {
        now += 20.0;
        state = manager::advance(&state, &frame(20.0), now, &mut scheduler, &config).state;
        assert!(now <= 700.0, "animation overran");
    }
    assert_eq!(state.actor.position.x, 570.0);
    assert_eq!(state.actor.phase, AttackPhase::Firing);

    let before = state.actor.position.x;
    state = manager::advance(&state, &frame(FRAME_BUDGET_MS), now, &mut scheduler, &config).state;
    let travelled = before - state.actor.position.x;
    assert!((travelled - DART_SPEED * KNOCKED_BACK_SPEED_MULTIPLIER).abs() < 1e-9);
}

#[test]
fn test_counter_debounce() {
    let config = AttackerConfig::default();
    let (state, first) = manager::counter(&firing_state(100.0), &counter_event(1, 50), 1_000.0, &config);
    assert_eq!(first, CounterOutcome::KnockedBack);

    // Within the debounce window even a legendary is ignored.
    let legendary = CounterEvent {
        is_legendary: true,
        ..counter_event(1, 50)
    };
    let (state, second) = manager::counter(
        &state,
        &legendary,
        1_000.0 + COUNTER_DEBOUNCE_MS - 1.0,
        &config,
    );
    assert_eq!(second, CounterOutcome::Ignored);
    assert_eq!(state.actor.phase, AttackPhase::Firing);

    let (state, third) = manager::counter(&state, &legendary, 1_000.0 + COUNTER_DEBOUNCE_MS, &config);
    assert_eq!(third, CounterOutcome::Destroyed);
    assert_eq!(state.actor.phase, AttackPhase::Cooldown);
}

#[test]
fn test_counter_ignored_when_inactive() {
    let config = AttackerConfig::default();
    let mut state = firing_state(300.0);
    state.is_active = false;
    let (next, outcome) = manager::counter(&state, &counter_event(5, 70), 0.0, &config);
    assert_eq!(outcome, CounterOutcome::Ignored);
    assert_eq!(next, state);
}

#[test]
fn test_counter_outcomes_reported_in_snapshot() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Locked, 500);
    engine.queue_command(AttackerCommand::Counter(counter_event(5, 70)));
    let snap = step(&mut engine, &clock, DT);
    assert_eq!(snap.counter_outcomes, vec![CounterOutcome::Ignored]);

    run_until(&mut engine, &clock, AttackPhase::Firing, 500);
    // Let the dart travel well onto the screen first.
    for _ in 0..40 {
        step(&mut engine, &clock, DT);
    }
    engine.queue_commands([
        AttackerCommand::Counter(counter_event(1, 50)),
        AttackerCommand::Counter(counter_event(1, 50)),
    ]);
    let snap = step(&mut engine, &clock, DT);
    assert_eq!(
        snap.counter_outcomes,
        vec![CounterOutcome::KnockedBack, CounterOutcome::Ignored]
    );
    assert!(snap.knockback_active);
}

#[test]
fn test_immunity_cleared_after_cycle() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Firing, 500);
    for _ in 0..40 {
        step(&mut engine, &clock, DT);
    }
    engine.queue_command(AttackerCommand::Counter(counter_event(1, 50)));
    step(&mut engine, &clock, DT);
    assert!(engine.state().actor.knockback.immune);

    run_until(&mut engine, &clock, AttackPhase::Cooldown, 2_000);
    assert!(engine.state().actor.knockback.immune);
    run_until(&mut engine, &clock, AttackPhase::Idle, 500);
    assert!(!engine.state().actor.knockback.immune);
}

// ---- Collision queries ----

#[test]
fn test_hit_and_range_only_while_firing() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Locked, 500);
    let pos = engine.snapshot().position;
    assert!(!engine.check_hit(pos, 10.0));
    assert!(!engine.in_danger_range(pos));

    run_until(&mut engine, &clock, AttackPhase::Firing, 500);
    let pos = engine.snapshot().position;
    assert!(engine.check_hit(pos, 10.0));
    assert!(engine.in_danger_range(pos + DVec2::new(-DANGER_RADIUS + 1.0, 0.0)));
    assert!(!engine.in_danger_range(pos + DVec2::new(-DANGER_RADIUS - 1.0, 0.0)));
    assert!(!engine.check_hit(pos + DVec2::new(0.0, 100.0), 10.0));
}

// ---- Snapshot ----

#[test]
fn test_snapshot_reports_phase_progress() {
    let (mut engine, clock) = started_engine(eager_config());
    run_until(&mut engine, &clock, AttackPhase::Tracking, 10);
    let half = (TRACKING_DURATION_MS / 2.0 / DT) as usize;
    let mut snap = engine.snapshot();
    for _ in 0..half {
        snap = step(&mut engine, &clock, DT);
    }
    assert!((snap.phase_progress - 0.5).abs() < 0.01, "{}", snap.phase_progress);
    assert_eq!(snap.dimensions.width, DART_WIDTH);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_engine_phase_order(
        seed in any::<u64>(),
        frames in prop::collection::vec((1.0f64..50.0, 0.0f64..600.0, 0u8..12), 200..1500),
    ) {
        let (mut engine, clock) = started_engine(AttackerConfig {
            seed,
            ..eager_config()
        });
        let mut phase = AttackPhase::Idle;
        for (dt, player_y, action) in frames {
            match action {
                0 => engine.queue_command(AttackerCommand::Counter(counter_event(3, 60))),
                1 => engine.queue_command(AttackerCommand::Counter(CounterEvent {
                    is_legendary: true,
                    ..counter_event(1, 1)
                })),
                _ => {}
            }
            clock.advance(dt);
            let snap = engine.tick(&TickContext { player_y, ..frame(dt) });
            if snap.phase != phase {
                let forced = snap.phase == AttackPhase::Cooldown && phase.is_counterable();
                prop_assert!(
                    phase.next() == snap.phase || forced,
                    "illegal transition {:?} -> {:?}", phase, snap.phase
                );
                if snap.phase == AttackPhase::Idle {
                    prop_assert!(!engine.state().actor.knockback.immune);
                }
                phase = snap.phase;
            }
            prop_assert!(snap.position.y.is_finite());
        }
    }
}
