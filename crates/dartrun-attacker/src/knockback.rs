//! Counter-attack knockback.
//!
//! A push is armed with [`apply`] and advanced with [`step`]. The horizontal
//! position follows a cubic ease-out from the start to the target and snaps to
//! the target once progress reaches 1.

use dartrun_core::components::AttackActor;
use dartrun_core::config::KnockbackTuning;
use dartrun_core::types::{sanitize_dt, Millis};

/// Push distance for a counter of the given level and attack stat.
///
/// `base + level * per_level + floor((attack - pivot) / step) * step`,
/// clamped to `[0, max_distance]`.
pub fn push_distance(level: u32, attack_stat: i32, tuning: &KnockbackTuning) -> f64 {
    let level_bonus = f64::from(level) * tuning.per_level;
    let attack_bonus = if tuning.attack_step > 0.0 {
        let over = f64::from(attack_stat) - f64::from(tuning.attack_pivot);
        (over / tuning.attack_step).floor() * tuning.attack_step
    } else {
        0.0
    };
    (tuning.base_distance + level_bonus + attack_bonus).clamp(0.0, tuning.max_distance)
}

/// Cubic ease-out on `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Arm a push of `push` pixels to the right, never past `spawn_edge`.
///
/// Marks the dart immune for the rest of its attack cycle.
pub fn apply(actor: &AttackActor, push: f64, spawn_edge: f64) -> AttackActor {
    let mut next = actor.clone();
    let start_x = actor.position.x;
    next.knockback.active = true;
    next.knockback.start_x = start_x;
    next.knockback.target_x = (start_x + push.max(0.0)).min(spawn_edge.max(start_x));
    next.knockback.progress = 0.0;
    next.knockback.immune = true;
    next
}

/// Advance an armed push by `dt`. Returns the new actor and whether the
/// animation is still running.
pub fn step(actor: &AttackActor, dt: Millis, duration_ms: Millis) -> (AttackActor, bool) {
    let mut next = actor.clone();
    if !next.knockback.active {
        return (next, false);
    }
    let kb = &mut next.knockback;
    let dt = sanitize_dt(dt);
    kb.progress = if duration_ms > 0.0 {
        (kb.progress + dt / duration_ms).min(1.0)
    } else {
        1.0
    };

    if kb.progress >= 1.0 {
        kb.active = false;
        next.position.x = kb.target_x;
        return (next, false);
    }

    let eased = ease_out_cubic(kb.progress);
    next.position.x = (kb.start_x + (kb.target_x - kb.start_x) * eased).min(kb.target_x);
    (next, true)
}
