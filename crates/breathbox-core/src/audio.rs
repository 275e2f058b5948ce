//! Phase-cue audio with a tolerant play/stop contract.
//!
//! The breathing cycle must never block or abort on an audio failure:
//! playback errors are caught, logged and dropped. Actual sound output is
//! the embedding frontend's job, reached through [`AudioBackend`]; the
//! core ships the cue map (asset path and volume per cue) and the
//! stop-and-rewind semantics.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// One of the four sound cues a session can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseCue {
    Inhale,
    Hold,
    Exhale,
    End,
}

impl PhaseCue {
    /// The three per-phase cues, excluding the end-of-session cue.
    pub const PHASES: [PhaseCue; 3] = [PhaseCue::Inhale, PhaseCue::Hold, PhaseCue::Exhale];

    /// Asset path relative to the frontend's public directory.
    pub fn asset(&self) -> &'static str {
        match self {
            PhaseCue::Inhale => "audio/inhale.mp3",
            PhaseCue::Hold => "audio/hold.mp3",
            PhaseCue::Exhale => "audio/exhale.mp3",
            PhaseCue::End => "audio/end.mp3",
        }
    }

    /// Playback volume. The end cue is quieter than the phase cues.
    pub fn volume(&self) -> f32 {
        match self {
            PhaseCue::End => 0.4,
            _ => 0.6,
        }
    }
}

impl fmt::Display for PhaseCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseCue::Inhale => "inhale",
            PhaseCue::Hold => "hold",
            PhaseCue::Exhale => "exhale",
            PhaseCue::End => "end",
        };
        f.write_str(name)
    }
}

/// Non-fatal playback failure reported by a backend.
#[derive(Error, Debug)]
#[error("audio playback failed: {0}")]
pub struct PlaybackError(pub String);

/// Seam to whatever actually produces sound.
///
/// `play` restarts the cue from the beginning; `stop` pauses and rewinds
/// it, clearing any pending scheduled playback.
pub trait AudioBackend: Send + Sync {
    fn play(&self, cue: PhaseCue, volume: f32) -> Result<(), PlaybackError>;
    fn stop(&self, cue: PhaseCue);
}

/// Backend with no output device. Every cue resolves immediately.
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&self, _cue: PhaseCue, _volume: f32) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn stop(&self, _cue: PhaseCue) {}
}

/// Phase-synchronized cue player used by the cycle engine.
#[derive(Clone)]
pub struct AudioPlayer {
    backend: Arc<dyn AudioBackend>,
}

impl AudioPlayer {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self { backend }
    }

    /// Player that produces no sound at all.
    pub fn silent() -> Self {
        Self::new(Arc::new(NullBackend))
    }

    /// Trigger the cue for a phase. Resolves immediately with no effect
    /// when audio is disabled; otherwise stops any other phase cue first,
    /// then plays. Failures are logged and absorbed.
    pub fn play_phase(&self, cue: PhaseCue, enabled: bool) {
        if !enabled {
            return;
        }
        for other in PhaseCue::PHASES {
            if other != cue {
                self.backend.stop(other);
            }
        }
        if let Err(e) = self.backend.play(cue, cue.volume()) {
            warn!("{cue} cue failed: {e}");
        }
    }

    /// Play the end-of-session cue, silencing the phase cues first.
    pub fn play_end(&self, enabled: bool) {
        if !enabled {
            return;
        }
        self.stop_all();
        if let Err(e) = self.backend.play(PhaseCue::End, PhaseCue::End.volume()) {
            warn!("end cue failed: {e}");
        }
    }

    /// Pause and rewind every phase cue.
    pub fn stop_all(&self) {
        for cue in PhaseCue::PHASES {
            self.backend.stop(cue);
        }
    }
}
