//! Dart attack-cycle finite state machine.
//!
//! Pure functions that compute phase transitions and motion for the dart from
//! its current state and the frame context. No clock or RNG dependency; the
//! scheduler is consulted through a callback, only while idle.

use dartrun_core::commands::CounterEvent;
use dartrun_core::components::{AttackActor, KnockbackState};
use dartrun_core::config::{ActorTuning, KnockbackTuning};
use dartrun_core::enums::{AttackPhase, CounterOutcome};
use dartrun_core::events::AudioCue;
use dartrun_core::state::TickContext;
use dartrun_core::types::{sanitize_dt, Bounds, Millis};

use crate::knockback;

/// Output from one FSM tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FsmUpdate {
    pub actor: AttackActor,
    pub cues: Vec<AudioCue>,
    /// `(from, to)` when the phase changed this tick.
    pub transition: Option<(AttackPhase, AttackPhase)>,
}

/// Output from handing a counter event to the FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterUpdate {
    pub actor: AttackActor,
    pub outcome: CounterOutcome,
}

/// Advance the dart by one frame.
///
/// `spawn_signal` is called at most once, only while idle and past the warm-up
/// distance; returning `true` starts an attack. A zero, negative or
/// non-finite `dt` leaves the dart untouched.
pub fn update(
    actor: &AttackActor,
    ctx: &TickContext,
    tuning: &ActorTuning,
    knockback_tuning: &KnockbackTuning,
    spawn_signal: impl FnOnce() -> bool,
) -> FsmUpdate {
    let dt = sanitize_dt(ctx.dt);
    let mut next = actor.clone();
    let mut cues = Vec::new();

    if dt == 0.0 {
        return FsmUpdate {
            actor: next,
            cues,
            transition: None,
        };
    }

    let from = actor.phase;
    let bounds = ctx.bounds;

    // A push in progress owns x for this frame.
    let pushed = next.knockback.active;
    if pushed {
        let (stepped, _) = knockback::step(&next, dt, knockback_tuning.duration_ms);
        next = stepped;
    }

    if next.phase != AttackPhase::Idle {
        next.phase_timer += dt;
    }

    match next.phase {
        AttackPhase::Idle => {
            if ctx.distance_traveled >= tuning.warmup_distance && spawn_signal() {
                enter_tracking(&mut next, ctx, tuning);
            }
        }
        AttackPhase::Tracking => {
            next.target_y = bounds.clamp_y(ctx.player_y, tuning.icon_size);
            let y = next.position.y + (next.target_y - next.position.y) * tuning.tracking_smoothing;
            next.position.y = bounds.clamp_y(y, tuning.icon_size);

            let progress = phase_progress(&next, tuning);
            next.beep_timer -= dt;
            if next.beep_timer <= 0.0 {
                cues.push(AudioCue::TrackingBeep { progress });
                next.beep_timer = beep_interval(progress, tuning);
            }

            if next.phase_timer >= tuning.tracking_duration_ms {
                next.phase = AttackPhase::Locked;
                next.phase_timer = 0.0;
                cues.push(AudioCue::LockOn);
            }
        }
        AttackPhase::Locked => {
            if next.phase_timer >= tuning.lock_duration_ms {
                next.phase = AttackPhase::Firing;
                next.phase_timer = 0.0;
                next.position.x = bounds.right();
                next.knockback.active = false;
                cues.push(AudioCue::Launch);
            }
        }
        AttackPhase::Firing => {
            if !pushed {
                let multiplier = if next.knockback.immune {
                    tuning.knocked_back_speed_multiplier
                } else {
                    1.0
                };
                next.position.x -= tuning.dart_speed * multiplier * dt / tuning.frame_budget_ms;
            }
            if next.position.x < -tuning.offscreen_margin {
                enter_cooldown(&mut next);
            }
        }
        AttackPhase::Cooldown => {
            if next.phase_timer >= tuning.cooldown_phase_duration_ms {
                next.phase = AttackPhase::Idle;
                next.phase_timer = 0.0;
                next.knockback = KnockbackState::default();
                next.position.x = bounds.right() + tuning.offscreen_margin;
            }
        }
    }

    let transition = (next.phase != from).then_some((from, next.phase));
    FsmUpdate {
        actor: next,
        cues,
        transition,
    }
}

/// Apply a counter event.
///
/// Only a tracking or firing dart can be countered. Legendary counters remove
/// the dart. Otherwise the dart is pushed right, or forced into cooldown if
/// the push would carry it past the right edge.
pub fn apply_counter(
    actor: &AttackActor,
    event: &CounterEvent,
    bounds: Bounds,
    tuning: &ActorTuning,
    knockback_tuning: &KnockbackTuning,
) -> CounterUpdate {
    if !actor.phase.is_counterable() {
        return CounterUpdate {
            actor: actor.clone(),
            outcome: CounterOutcome::Ignored,
        };
    }

    if event.is_legendary {
        let mut next = actor.clone();
        enter_cooldown(&mut next);
        next.position.x = -tuning.offscreen_margin - next.dimensions.width;
        return CounterUpdate {
            actor: next,
            outcome: CounterOutcome::Destroyed,
        };
    }

    if actor.knockback.immune {
        return CounterUpdate {
            actor: actor.clone(),
            outcome: CounterOutcome::Immune,
        };
    }

    let push = knockback::push_distance(
        event.pokemon_level,
        event.pokemon_attack_stat,
        knockback_tuning,
    );

    if actor.position.x + push > bounds.right() {
        let mut next = actor.clone();
        enter_cooldown(&mut next);
        next.knockback.immune = true;
        next.position.x = bounds.right() + tuning.offscreen_margin;
        return CounterUpdate {
            actor: next,
            outcome: CounterOutcome::Repelled,
        };
    }

    let spawn_edge = bounds.right() - tuning.tracking_inset;
    CounterUpdate {
        actor: knockback::apply(actor, push, spawn_edge),
        outcome: CounterOutcome::KnockedBack,
    }
}

/// A fresh idle dart sized to `bounds`. Safe from any state.
pub fn reset(bounds: Bounds) -> AttackActor {
    AttackActor::idle(bounds)
}

/// Progress through the current timed phase in `[0, 1]`.
///
/// Firing has no fixed duration and reports 0; idle reports 0.
pub fn phase_progress(actor: &AttackActor, tuning: &ActorTuning) -> f64 {
    let duration = match actor.phase {
        AttackPhase::Tracking => tuning.tracking_duration_ms,
        AttackPhase::Locked => tuning.lock_duration_ms,
        AttackPhase::Cooldown => tuning.cooldown_phase_duration_ms,
        AttackPhase::Idle | AttackPhase::Firing => return 0.0,
    };
    if duration <= 0.0 {
        return 1.0;
    }
    (actor.phase_timer / duration).clamp(0.0, 1.0)
}

/// Beep interval, shrinking linearly as tracking progresses.
pub fn beep_interval(progress: f64, tuning: &ActorTuning) -> Millis {
    let p = progress.clamp(0.0, 1.0);
    tuning.beep_interval_start_ms + (tuning.beep_interval_end_ms - tuning.beep_interval_start_ms) * p
}

fn enter_tracking(actor: &mut AttackActor, ctx: &TickContext, tuning: &ActorTuning) {
    let bounds = ctx.bounds;
    actor.phase = AttackPhase::Tracking;
    actor.phase_timer = 0.0;
    actor.beep_timer = 0.0;
    actor.position.x = bounds.right() - tuning.tracking_inset;
    actor.position.y = bounds.clamp_y(actor.position.y, tuning.icon_size);
    actor.target_y = bounds.clamp_y(ctx.player_y, tuning.icon_size);
    actor.knockback = KnockbackState::default();
}

fn enter_cooldown(actor: &mut AttackActor) {
    actor.phase = AttackPhase::Cooldown;
    actor.phase_timer = 0.0;
    actor.knockback.active = false;
}
