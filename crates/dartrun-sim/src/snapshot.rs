//! Snapshot building: turns manager state into the renderer's read-only view.
//!
//! Never modifies the state.

use dartrun_core::config::AttackerConfig;
use dartrun_core::enums::CounterOutcome;
use dartrun_core::events::AudioCue;
use dartrun_core::state::AttackerSnapshot;

use dartrun_attacker::fsm;

use crate::manager::ManagerState;

/// Build the snapshot for the current state plus this tick's events.
pub fn build_snapshot(
    state: &ManagerState,
    config: &AttackerConfig,
    audio_cues: Vec<AudioCue>,
    counter_outcomes: Vec<CounterOutcome>,
) -> AttackerSnapshot {
    let actor = &state.actor;
    AttackerSnapshot {
        is_active: state.is_active,
        phase: actor.phase,
        position: actor.position,
        dimensions: actor.dimensions,
        knockback_active: actor.knockback.active,
        phase_progress: fsm::phase_progress(actor, &config.actor),
        wave_phase: state.schedule.wave_phase,
        wave_number: state.schedule.wave_number,
        audio_cues,
        counter_outcomes,
    }
}
