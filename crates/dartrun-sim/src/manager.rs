//! Manager state and its value-returning transforms.
//!
//! Every function here takes the current state by reference and returns a new
//! one. Only the engine stores the result.

use rand::Rng;
use serde::{Deserialize, Serialize};

use dartrun_core::commands::CounterEvent;
use dartrun_core::components::{AttackActor, ScheduleState};
use dartrun_core::config::AttackerConfig;
use dartrun_core::enums::{AttackPhase, CounterOutcome};
use dartrun_core::events::AudioCue;
use dartrun_core::state::TickContext;
use dartrun_core::types::{sanitize_dt, Bounds, Millis};

use dartrun_attacker::fsm;
use dartrun_attacker::scheduler::SpawnScheduler;

/// Everything the frame loop owns for the attacker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerState {
    pub actor: AttackActor,
    pub is_active: bool,
    pub schedule: ScheduleState,
    /// Clock time of the last counter that landed.
    pub last_counter_timestamp: Option<Millis>,
    /// Bounds from the most recent tick or start; used by reset.
    pub bounds: Bounds,
    /// Frame time that passed while the dart was busy and the scheduler was
    /// not consulted. Handed to the scheduler on its next tick.
    pub unscheduled_ms: Millis,
}

impl ManagerState {
    /// An inactive manager with an idle dart.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            actor: AttackActor::idle(bounds),
            is_active: false,
            schedule: ScheduleState::default(),
            last_counter_timestamp: None,
            bounds,
            unscheduled_ms: 0.0,
        }
    }
}

/// Result of one manager tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerTick {
    pub state: ManagerState,
    pub cues: Vec<AudioCue>,
    pub transition: Option<(AttackPhase, AttackPhase)>,
}

/// A fresh, active run.
pub fn start(bounds: Bounds) -> ManagerState {
    ManagerState {
        is_active: true,
        ..ManagerState::new(bounds)
    }
}

/// Deactivate and park the dart.
pub fn stop(state: &ManagerState) -> ManagerState {
    ManagerState {
        is_active: false,
        actor: fsm::reset(state.bounds),
        unscheduled_ms: 0.0,
        ..state.clone()
    }
}

/// Return the dart to idle at the current bounds. The wave schedule carries on.
pub fn reset(state: &ManagerState) -> ManagerState {
    ManagerState {
        actor: fsm::reset(state.bounds),
        last_counter_timestamp: None,
        ..state.clone()
    }
}

/// Advance one frame. `now` must be sampled once for the whole tick.
pub fn advance<R: Rng>(
    state: &ManagerState,
    ctx: &TickContext,
    now: Millis,
    scheduler: &mut SpawnScheduler<R>,
    config: &AttackerConfig,
) -> ManagerTick {
    let dt = sanitize_dt(ctx.dt);
    if !state.is_active || dt == 0.0 {
        return ManagerTick {
            state: state.clone(),
            cues: Vec::new(),
            transition: None,
        };
    }

    let ctx = TickContext { dt, ..*ctx };
    let mut next = state.clone();
    next.bounds = ctx.bounds;

    let backlog = state.unscheduled_ms + dt;
    let mut schedule = state.schedule;
    let mut consulted = false;

    let update = fsm::update(&state.actor, &ctx, &config.actor, &config.knockback, || {
        consulted = true;
        let tick = scheduler.update(&schedule, backlog, now);
        schedule = tick.schedule;
        tick.should_spawn
    });

    next.actor = update.actor;
    next.schedule = schedule;
    next.unscheduled_ms = if consulted { 0.0 } else { backlog };

    ManagerTick {
        state: next,
        cues: update.cues,
        transition: update.transition,
    }
}

/// Apply a counter event received at `now`.
pub fn counter(
    state: &ManagerState,
    event: &CounterEvent,
    now: Millis,
    config: &AttackerConfig,
) -> (ManagerState, CounterOutcome) {
    if !state.is_active {
        return (state.clone(), CounterOutcome::Ignored);
    }
    if let Some(last) = state.last_counter_timestamp {
        if now - last < config.knockback.counter_debounce_ms {
            return (state.clone(), CounterOutcome::Ignored);
        }
    }

    let result = fsm::apply_counter(
        &state.actor,
        event,
        state.bounds,
        &config.actor,
        &config.knockback,
    );

    let mut next = state.clone();
    next.actor = result.actor;
    if matches!(
        result.outcome,
        CounterOutcome::KnockedBack | CounterOutcome::Repelled | CounterOutcome::Destroyed
    ) {
        next.last_counter_timestamp = Some(now);
    }
    (next, result.outcome)
}
