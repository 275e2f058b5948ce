mod config;
mod engine;

pub use config::SessionConfig;
pub use engine::{CycleProgress, Phase, SessionEngine, INITIAL_SCALE, MAX_SCALE, RESTING_SCALE};
