use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::Phase;

/// Every observable state change in the cycle engine produces an Event.
/// Frontends subscribe through a [`SessionObserver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        run: Uuid,
        total_cycles: i64,
        at: DateTime<Utc>,
    },
    /// The cycle counter was incremented; published before the cycle's
    /// first phase begins.
    CycleStarted {
        cycle: i64,
        total_cycles: i64,
        at: DateTime<Utc>,
    },
    /// A phase began. Side effects (scale target, ring sweep, audio cue)
    /// are published here, strictly before the phase's wait starts.
    PhaseStarted {
        phase: Phase,
        duration_secs: i64,
        /// Scale the breathing circle should animate toward over the
        /// phase duration.
        scale_target: f64,
        /// Progress-ring sweep duration; `None` when no sweep runs
        /// (non-hold phases, or a hold of zero seconds).
        ring_sweep_secs: Option<i64>,
        at: DateTime<Utc>,
    },
    /// The session ran all its cycles. The end cue fires exactly once,
    /// here and nowhere else.
    SessionCompleted {
        cycles_completed: i64,
        at: DateTime<Utc>,
    },
    /// The session was cancelled and progress reset.
    SessionStopped {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        current_cycle: i64,
        total_cycles: i64,
        scale_target: f64,
        at: DateTime<Utc>,
    },
}

/// Receives engine events. Implementations must be cheap and non-blocking;
/// the engine calls them synchronously before suspending.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// Observer that discards everything.
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_event(&self, _event: &Event) {}
}
