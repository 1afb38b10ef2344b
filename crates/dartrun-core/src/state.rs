//! Per-frame input and the read-only snapshot handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::enums::{AttackPhase, CounterOutcome, WavePhase};
use crate::events::AudioCue;
use crate::types::{Bounds, Dimensions, Millis, Position};

/// Everything the game loop supplies once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickContext {
    /// Frame delta in milliseconds.
    pub dt: Millis,
    pub player_y: f64,
    pub bounds: Bounds,
    pub distance_traveled: f64,
    pub score: u64,
}

impl TickContext {
    pub fn new(dt: Millis, player_y: f64, bounds: Bounds) -> Self {
        Self {
            dt,
            player_y,
            bounds,
            distance_traveled: 0.0,
            score: 0,
        }
    }
}

/// Attacker state broadcast to the renderer after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackerSnapshot {
    pub is_active: bool,
    pub phase: AttackPhase,
    pub position: Position,
    pub dimensions: Dimensions,
    pub knockback_active: bool,
    /// Progress through the current timed phase in `[0, 1]`.
    pub phase_progress: f64,
    pub wave_phase: WavePhase,
    pub wave_number: u32,
    pub audio_cues: Vec<AudioCue>,
    /// Outcomes of counter events processed this tick, in order.
    pub counter_outcomes: Vec<CounterOutcome>,
}
