//! Commands sent from the game to the attacker.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Bounds;

/// The player deflecting or attacking the dart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterEvent {
    pub pokemon_level: u32,
    pub pokemon_attack_stat: i32,
    /// Legendary counters remove the dart outright.
    #[serde(default)]
    pub is_legendary: bool,
}

/// All possible attacker commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttackerCommand {
    /// Begin a run with the given playfield bounds.
    Start { bounds: Bounds },
    /// End the run. The dart stops ticking until the next `Start`.
    Stop,
    /// Return the dart to idle, sized to the last known bounds.
    Reset,
    /// A counter-attack from the player.
    Counter(CounterEvent),
}
