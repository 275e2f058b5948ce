//! # Breathbox Core Library
//!
//! This library provides the core logic for Breathbox, a guided-breathing
//! app. All behavior lives here; the CLI binary and the HTTP server are
//! thin layers over the same library.
//!
//! ## Architecture
//!
//! - **Cycle Engine**: a token-guarded async state machine that runs one
//!   breathing session (inhale/hold/exhale, repeated) and publishes phase
//!   transitions to an observer
//! - **Settings**: a single JSON settings record persisted in the app
//!   data directory
//! - **Accountability**: a two-person daily completion ledger backed by a
//!   JSON file, with an HTTP client for the server's API
//! - **Theme**: time-of-day gradient and star-field tables for the
//!   ambient presentation
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: the breathing-cycle state machine
//! - [`SessionConfig`] / [`SettingsStore`]: durations, cycle count and
//!   audio flag, persisted across sessions
//! - [`AudioPlayer`]: phase-cue playback that never blocks the cycle loop
//! - [`LedgerStore`] / [`AccountabilityClient`]: completion tracking

pub mod accountability;
pub mod audio;
pub mod error;
pub mod events;
pub mod session;
pub mod settings;
pub mod theme;

pub use accountability::{AccountabilityClient, DayPeriod, Ledger, LedgerStore, Person, PersonDay};
pub use audio::{AudioBackend, AudioPlayer, NullBackend, PhaseCue, PlaybackError};
pub use error::{ConfigError, CoreError, LedgerError};
pub use events::{Event, NullObserver, SessionObserver};
pub use session::{CycleProgress, Phase, SessionConfig, SessionEngine};
pub use settings::{data_dir, SettingsStore};
