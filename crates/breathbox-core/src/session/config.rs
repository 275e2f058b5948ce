//! Session configuration: phase durations, cycle count, audio flag.
//!
//! Serialized with the camelCase field names the web client stores under
//! its single settings key, so the record on disk matches the wire shape.

use serde::{Deserialize, Serialize};

fn default_inhale() -> i64 {
    4
}
fn default_hold() -> i64 {
    16
}
fn default_exhale() -> i64 {
    8
}
fn default_cycles() -> i64 {
    10
}
fn default_audio() -> bool {
    true
}

/// One guided-breathing session's parameters.
///
/// Invariants (enforced by [`SessionConfig::clamped`], not by the store):
/// inhale/exhale strictly positive, hold non-negative, cycle count
/// positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inhale duration in seconds.
    #[serde(rename = "inhaleTime", default = "default_inhale")]
    pub inhale_secs: i64,
    /// Hold duration in seconds. May be zero.
    #[serde(rename = "holdTime", default = "default_hold")]
    pub hold_secs: i64,
    /// Exhale duration in seconds.
    #[serde(rename = "exhaleTime", default = "default_exhale")]
    pub exhale_secs: i64,
    /// Number of inhale/hold/exhale cycles in a session.
    #[serde(rename = "totalCycles", default = "default_cycles")]
    pub total_cycles: i64,
    /// Whether phase audio cues are played.
    #[serde(rename = "audioEnabled", default = "default_audio")]
    pub audio_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inhale_secs: default_inhale(),
            hold_secs: default_hold(),
            exhale_secs: default_exhale(),
            total_cycles: default_cycles(),
            audio_enabled: default_audio(),
        }
    }
}

impl SessionConfig {
    /// Returns a copy with every field pulled into its valid range.
    ///
    /// Idempotent: clamping a clamped config is a no-op.
    pub fn clamped(&self) -> Self {
        Self {
            inhale_secs: self.inhale_secs.max(1),
            hold_secs: self.hold_secs.max(0),
            exhale_secs: self.exhale_secs.max(1),
            total_cycles: self.total_cycles.max(1),
            audio_enabled: self.audio_enabled,
        }
    }

    /// Seconds spent in one full inhale/hold/exhale cycle.
    pub fn cycle_secs(&self) -> i64 {
        self.inhale_secs + self.hold_secs + self.exhale_secs
    }

    /// Total seconds for a full session of `total_cycles` cycles.
    pub fn session_secs(&self) -> i64 {
        self.cycle_secs().saturating_mul(self.total_cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stored_record() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.inhale_secs, 4);
        assert_eq!(cfg.hold_secs, 16);
        assert_eq!(cfg.exhale_secs, 8);
        assert_eq!(cfg.total_cycles, 10);
        assert!(cfg.audio_enabled);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(SessionConfig::default()).unwrap();
        assert_eq!(json["inhaleTime"], 4);
        assert_eq!(json["holdTime"], 16);
        assert_eq!(json["exhaleTime"], 8);
        assert_eq!(json["totalCycles"], 10);
        assert_eq!(json["audioEnabled"], true);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SessionConfig = serde_json::from_str(r#"{"inhaleTime": 6}"#).unwrap();
        assert_eq!(cfg.inhale_secs, 6);
        assert_eq!(cfg.hold_secs, 16);
        assert!(cfg.audio_enabled);
    }

    #[test]
    fn clamp_pulls_values_into_range() {
        let cfg = SessionConfig {
            inhale_secs: 0,
            hold_secs: -3,
            exhale_secs: -1,
            total_cycles: -5,
            audio_enabled: false,
        }
        .clamped();
        assert_eq!(cfg.inhale_secs, 1);
        assert_eq!(cfg.hold_secs, 0);
        assert_eq!(cfg.exhale_secs, 1);
        assert_eq!(cfg.total_cycles, 1);
    }

    #[test]
    fn clamp_is_idempotent() {
        let cfg = SessionConfig {
            inhale_secs: -10,
            hold_secs: 0,
            exhale_secs: 2,
            total_cycles: 0,
            audio_enabled: true,
        };
        assert_eq!(cfg.clamped(), cfg.clamped().clamped());
    }

    #[test]
    fn session_duration_sums_cycles() {
        let cfg = SessionConfig {
            inhale_secs: 4,
            hold_secs: 4,
            exhale_secs: 4,
            total_cycles: 2,
            audio_enabled: true,
        };
        assert_eq!(cfg.cycle_secs(), 12);
        assert_eq!(cfg.session_secs(), 24);
    }
}
