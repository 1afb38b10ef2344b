//! Attacker AI for DARTRUN.
//!
//! Implements the dart's attack-cycle state machine, the wave scheduler that
//! paces attacks, eased knockback, and the hit/range collision tests.

pub mod collision;
pub mod fsm;
pub mod knockback;
pub mod scheduler;

pub use dartrun_core as core;
