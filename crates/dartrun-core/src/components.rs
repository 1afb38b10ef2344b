//! Plain data carried between ticks.
//!
//! These structs hold no logic beyond construction. Phase transitions live in
//! `dartrun-attacker`, ownership lives in `dartrun-sim`.

use serde::{Deserialize, Serialize};

use crate::constants::OFFSCREEN_MARGIN;
use crate::enums::{AttackPhase, WavePhase};
use crate::types::{Bounds, Dimensions, Millis, Position};

/// Knockback animation and immunity state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KnockbackState {
    /// An eased push is in progress and overrides x.
    pub active: bool,
    pub start_x: f64,
    pub target_x: f64,
    /// Animation progress in `[0, 1]`.
    pub progress: f64,
    /// Knockback already landed this attack cycle. Also slows firing.
    pub immune: bool,
}

/// The single scripted attacker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackActor {
    pub phase: AttackPhase,
    pub position: Position,
    /// Clamped player y the dart is chasing while tracking.
    pub target_y: f64,
    /// Milliseconds spent in the current phase.
    pub phase_timer: Millis,
    /// Milliseconds until the next tracking beep.
    pub beep_timer: Millis,
    pub dimensions: Dimensions,
    pub knockback: KnockbackState,
}

impl AttackActor {
    /// A fresh idle dart parked off screen, vertically centred in `bounds`.
    pub fn idle(bounds: Bounds) -> Self {
        let y = bounds.height / 2.0;
        Self {
            phase: AttackPhase::Idle,
            position: Position::new(bounds.right() + OFFSCREEN_MARGIN, y),
            target_y: y,
            phase_timer: 0.0,
            beep_timer: 0.0,
            dimensions: Dimensions::default(),
            knockback: KnockbackState::default(),
        }
    }
}

/// Wave scheduler bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    /// Clock time at which the next active-wave attack becomes eligible.
    pub next_spawn_time: Millis,
    pub wave_phase: WavePhase,
    /// Milliseconds left in the current wave phase.
    pub wave_timer: Millis,
    pub attacks_this_wave: u32,
    pub total_attacks: u32,
    /// Clock time of the most recent attack, if any.
    pub last_spawn_time: Option<Millis>,
    /// 1-based index of the current active wave; rests keep the last number.
    pub wave_number: u32,
    /// Set until the scheduler has run its first tick and armed wave one.
    pub pending_start: bool,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            next_spawn_time: 0.0,
            wave_phase: WavePhase::Active,
            wave_timer: 0.0,
            attacks_this_wave: 0,
            total_attacks: 0,
            last_spawn_time: None,
            wave_number: 0,
            pending_start: true,
        }
    }
}
