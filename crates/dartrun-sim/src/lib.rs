//! Frame-loop integration for the DARTRUN attacker.
//!
//! Owns the manager state, samples the clock once per tick, drains queued
//! commands, runs the attacker FSM and scheduler, and produces
//! `AttackerSnapshot`s for the renderer.

pub mod clock;
pub mod engine;
pub mod manager;
pub mod snapshot;

pub use dartrun_core as core;
pub use engine::AttackerEngine;

#[cfg(test)]
mod tests;
