//! Events emitted by the attacker for the audio collaborator.

use serde::{Deserialize, Serialize};

/// Fire-and-forget audio cues. The attacker never waits on playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioCue {
    /// Tracking finished; the dart is locked on.
    LockOn,
    /// The dart has been launched.
    Launch,
    /// Periodic tracking beep. `progress` is tracking progress in `[0, 1]`.
    TrackingBeep { progress: f64 },
}
