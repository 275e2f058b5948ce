//! The guided-breathing cycle engine.
//!
//! Runs one session: `total_cycles` repetitions of Inhale -> Hold ->
//! Exhale, terminating back in Idle on completion or cancellation. Phase
//! side effects (scale target, ring sweep, audio cue) are published
//! synchronously before each wait begins, so observers always see the
//! transition strictly before the corresponding suspension.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Inhale -> Hold -> Exhale -> (Inhale | Completed -> Idle)
//! ```
//!
//! ## Cancellation
//!
//! Cooperative and token-based, not preemptive. `start()` mints a run
//! token; every suspension resumption re-checks that its token is still
//! the live one and exits without further side effects otherwise. A
//! cancelled run's pending timer still fires, but its continuation is a
//! no-op. At most one run advances side effects at any instant.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audio::{AudioPlayer, PhaseCue};
use crate::error::Result;
use crate::events::{Event, SessionObserver};
use crate::session::SessionConfig;
use crate::settings::SettingsStore;

/// Circle scale at the bottom of an exhale.
pub const INITIAL_SCALE: f64 = 0.05;
/// Circle scale at the top of an inhale, held through the hold phase.
pub const MAX_SCALE: f64 = 1.4;
/// Circle scale while idle between sessions.
pub const RESTING_SCALE: f64 = 0.725;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// Scale the breathing circle animates toward during this phase.
    pub fn scale_target(&self) -> f64 {
        match self {
            Phase::Idle => RESTING_SCALE,
            Phase::Inhale | Phase::Hold => MAX_SCALE,
            Phase::Exhale => INITIAL_SCALE,
        }
    }

    /// The sound cue tied to this phase, if any.
    pub fn cue(&self) -> Option<PhaseCue> {
        match self {
            Phase::Idle => None,
            Phase::Inhale => Some(PhaseCue::Inhale),
            Phase::Hold => Some(PhaseCue::Hold),
            Phase::Exhale => Some(PhaseCue::Exhale),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a session currently is. Mutated only by the engine; reset to
/// `{0, Idle}` on stop and on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProgress {
    pub current_cycle: i64,
    pub phase: Phase,
}

impl Default for CycleProgress {
    fn default() -> Self {
        Self {
            current_cycle: 0,
            phase: Phase::Idle,
        }
    }
}

struct Shared {
    config: SessionConfig,
    progress: CycleProgress,
    /// Run token of the live session, if any. Stale continuations compare
    /// their own token against this and bail out on mismatch.
    live: Option<Uuid>,
}

/// The breathing-cycle state machine.
///
/// Cheaply cloneable handle; clones share one session's state. `start()`
/// must be called inside a tokio runtime, as the phase loop is spawned
/// onto it.
#[derive(Clone)]
pub struct SessionEngine {
    shared: Arc<Mutex<Shared>>,
    idle: Arc<Notify>,
    audio: AudioPlayer,
    observer: Arc<dyn SessionObserver>,
    settings: Option<SettingsStore>,
}

impl SessionEngine {
    /// Engine whose reconfigurations persist through `settings`.
    pub fn new(
        config: SessionConfig,
        audio: AudioPlayer,
        observer: Arc<dyn SessionObserver>,
        settings: SettingsStore,
    ) -> Self {
        Self::build(config, audio, observer, Some(settings))
    }

    /// Engine without settings persistence.
    pub fn with_config(
        config: SessionConfig,
        audio: AudioPlayer,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        Self::build(config, audio, observer, None)
    }

    fn build(
        config: SessionConfig,
        audio: AudioPlayer,
        observer: Arc<dyn SessionObserver>,
        settings: Option<SettingsStore>,
    ) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                config: config.clamped(),
                progress: CycleProgress::default(),
                live: None,
            })),
            idle: Arc::new(Notify::new()),
            audio,
            observer,
            settings,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> SessionConfig {
        self.lock().config.clone()
    }

    pub fn progress(&self) -> CycleProgress {
        self.lock().progress
    }

    pub fn is_active(&self) -> bool {
        self.lock().live.is_some()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let st = self.lock();
        Event::StateSnapshot {
            phase: st.progress.phase,
            current_cycle: st.progress.current_cycle,
            total_cycles: st.config.total_cycles,
            scale_target: st.progress.phase.scale_target(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. Rejected as a logged no-op when a run is already
    /// live; otherwise mints a fresh run token, resets progress and
    /// spawns the phase loop. Returns the new token.
    pub fn start(&self) -> Option<Uuid> {
        let (token, config) = {
            let mut st = self.lock();
            if st.live.is_some() {
                warn!("session already running; start ignored");
                return None;
            }
            let token = Uuid::new_v4();
            st.live = Some(token);
            st.progress = CycleProgress::default();
            (token, st.config.clone())
        };
        debug!(%token, "session starting");
        self.observer.on_event(&Event::SessionStarted {
            run: token,
            total_cycles: config.total_cycles,
            at: Utc::now(),
        });
        let engine = self.clone();
        tokio::spawn(async move {
            engine.run(token, config).await;
        });
        Some(token)
    }

    /// Cancel the live session. Synchronously invalidates the run token,
    /// resets progress to `{0, Idle}`, stops all phase audio and resets
    /// the ring. Idempotent when already idle.
    pub fn stop(&self) {
        let was_active = {
            let mut st = self.lock();
            let was_active = st.live.take().is_some();
            st.progress = CycleProgress::default();
            was_active
        };
        if !was_active {
            debug!("stop ignored; already idle");
            return;
        }
        self.audio.stop_all();
        self.observer.on_event(&Event::SessionStopped { at: Utc::now() });
        self.idle.notify_waiters();
    }

    /// Replace the configuration. While idle this only stores and
    /// persists the clamped values; while a run is active it forces a
    /// `stop()` first -- an in-flight session never silently picks up new
    /// timings. Returns the clamped config.
    pub fn reconfigure(&self, config: SessionConfig) -> Result<SessionConfig> {
        let clamped = config.clamped();
        let was_active = {
            let mut st = self.lock();
            st.config = clamped.clone();
            st.live.is_some()
        };
        if was_active {
            info!("configuration changed mid-session; stopping");
            self.stop();
        }
        if let Some(store) = &self.settings {
            store.save(&clamped)?;
        }
        Ok(clamped)
    }

    /// Resolves once no session is live. Usable alongside `start()` to
    /// wait out a full run.
    pub async fn wait_until_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if !self.is_active() {
                return;
            }
            notified.await;
        }
    }

    // ── Phase loop ───────────────────────────────────────────────────

    async fn run(&self, token: Uuid, config: SessionConfig) {
        let total = config.total_cycles;
        let mut cycle = 0;
        while cycle < total {
            cycle += 1;
            if !self.begin_cycle(token, cycle, total) {
                return;
            }
            if !self.begin_phase(token, Phase::Inhale, config.inhale_secs, &config) {
                return;
            }
            sleep(secs(config.inhale_secs)).await;
            if !self.begin_phase(token, Phase::Hold, config.hold_secs, &config) {
                return;
            }
            sleep(secs(config.hold_secs)).await;
            if !self.begin_phase(token, Phase::Exhale, config.exhale_secs, &config) {
                return;
            }
            sleep(secs(config.exhale_secs)).await;
        }
        self.complete(token, &config);
    }

    /// Increment the cycle counter and publish it. Returns false when the
    /// token is stale.
    fn begin_cycle(&self, token: Uuid, cycle: i64, total: i64) -> bool {
        {
            let mut st = self.lock();
            if st.live != Some(token) {
                return false;
            }
            st.progress.current_cycle = cycle;
        }
        self.observer.on_event(&Event::CycleStarted {
            cycle,
            total_cycles: total,
            at: Utc::now(),
        });
        true
    }

    /// Enter a phase: update progress, publish the transition, fire the
    /// cue. A hold of zero seconds still transitions but carries no cue
    /// and no ring sweep. Returns false when the token is stale.
    fn begin_phase(&self, token: Uuid, phase: Phase, duration_secs: i64, config: &SessionConfig) -> bool {
        {
            let mut st = self.lock();
            if st.live != Some(token) {
                return false;
            }
            st.progress.phase = phase;
        }
        let ring_sweep_secs = match phase {
            Phase::Hold if duration_secs > 0 => Some(duration_secs),
            _ => None,
        };
        debug!("{phase} for {duration_secs}s");
        self.observer.on_event(&Event::PhaseStarted {
            phase,
            duration_secs,
            scale_target: phase.scale_target(),
            ring_sweep_secs,
            at: Utc::now(),
        });
        let silent_hold = phase == Phase::Hold && duration_secs == 0;
        if !silent_hold {
            if let Some(cue) = phase.cue() {
                self.audio.play_phase(cue, config.audio_enabled);
            }
        }
        true
    }

    /// Natural completion: end cue once, then the same reset as `stop()`.
    fn complete(&self, token: Uuid, config: &SessionConfig) {
        {
            let mut st = self.lock();
            if st.live != Some(token) {
                return;
            }
            st.live = None;
            st.progress = CycleProgress::default();
        }
        info!("breathing session completed");
        self.audio.play_end(config.audio_enabled);
        self.observer.on_event(&Event::SessionCompleted {
            cycles_completed: config.total_cycles,
            at: Utc::now(),
        });
        self.idle.notify_waiters();
    }
}

fn secs(value: i64) -> Duration {
    Duration::from_secs(value.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullObserver;

    fn quiet_engine(config: SessionConfig) -> SessionEngine {
        SessionEngine::with_config(config, AudioPlayer::silent(), Arc::new(NullObserver))
    }

    #[test]
    fn scale_targets_follow_the_circle() {
        assert_eq!(Phase::Idle.scale_target(), RESTING_SCALE);
        assert_eq!(Phase::Inhale.scale_target(), MAX_SCALE);
        assert_eq!(Phase::Hold.scale_target(), MAX_SCALE);
        assert_eq!(Phase::Exhale.scale_target(), INITIAL_SCALE);
    }

    #[test]
    fn progress_defaults_to_idle() {
        let progress = CycleProgress::default();
        assert_eq!(progress.current_cycle, 0);
        assert_eq!(progress.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn reconfigure_clamps_and_stores() {
        let engine = quiet_engine(SessionConfig::default());
        let applied = engine
            .reconfigure(SessionConfig {
                inhale_secs: 0,
                hold_secs: -1,
                exhale_secs: 2,
                total_cycles: 0,
                audio_enabled: false,
            })
            .unwrap();
        assert_eq!(applied.inhale_secs, 1);
        assert_eq!(applied.hold_secs, 0);
        assert_eq!(applied.total_cycles, 1);
        assert_eq!(engine.config(), applied);
    }

    #[tokio::test]
    async fn stop_when_idle_is_a_noop() {
        let engine = quiet_engine(SessionConfig::default());
        engine.stop();
        engine.stop();
        assert_eq!(engine.progress(), CycleProgress::default());
        assert!(!engine.is_active());
    }

    #[tokio::test]
    async fn snapshot_reflects_idle_state() {
        let engine = quiet_engine(SessionConfig::default());
        match engine.snapshot() {
            Event::StateSnapshot {
                phase,
                current_cycle,
                total_cycles,
                scale_target,
                ..
            } => {
                assert_eq!(phase, Phase::Idle);
                assert_eq!(current_cycle, 0);
                assert_eq!(total_cycles, 10);
                assert_eq!(scale_target, RESTING_SCALE);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
