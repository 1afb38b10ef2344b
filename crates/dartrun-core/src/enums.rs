//! Enumeration types used throughout the attacker.

use serde::{Deserialize, Serialize};

/// Attack cycle phase of the dart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Off screen, waiting for the scheduler.
    #[default]
    Idle,
    /// Following the player vertically at the right edge.
    Tracking,
    /// Frozen telegraph; the player's reaction window.
    Locked,
    /// Flying leftwards across the screen. The only collision-relevant phase.
    Firing,
    /// Gone, waiting to return to idle.
    Cooldown,
}

impl AttackPhase {
    /// The phase that normally follows this one.
    pub fn next(self) -> AttackPhase {
        match self {
            AttackPhase::Idle => AttackPhase::Tracking,
            AttackPhase::Tracking => AttackPhase::Locked,
            AttackPhase::Locked => AttackPhase::Firing,
            AttackPhase::Firing => AttackPhase::Cooldown,
            AttackPhase::Cooldown => AttackPhase::Idle,
        }
    }

    /// Whether a counter-attack can land in this phase.
    pub fn is_counterable(self) -> bool {
        matches!(self, AttackPhase::Tracking | AttackPhase::Firing)
    }
}

/// Scheduler macro-period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Frequent attacks with a tension ramp.
    #[default]
    Active,
    /// Attacks suppressed apart from rare surprises.
    Rest,
}

/// Result of handing a counter event to the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterOutcome {
    /// Knockback animation armed.
    KnockedBack,
    /// Dart pushed past the right edge; forced into cooldown.
    Repelled,
    /// Legendary counter removed the dart immediately.
    Destroyed,
    /// Dart already knocked back this cycle.
    Immune,
    /// Not tracking or firing, inactive, or debounced.
    Ignored,
}
