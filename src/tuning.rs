//! Game balance and configuration
//!
//! Every constant the simulation reads lives here. A `Tuning` is built once
//! at load time and then only read.

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// Falling gift hazard (phase 1 by default)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftTuning {
    pub count: usize,
    /// Fall speed (units per reference frame)
    pub speed: f32,
    pub size: f32,
    /// Gifts spawn between -100 and -(100 + spawn_y_range) above the canvas
    pub spawn_y_range: f32,
    /// Number of distinct gift sprites
    pub variants: u32,
    /// Frames in the gift sparkle cycle
    pub frames: u32,
    /// Reference frames each sparkle frame is held
    pub frame_hold: f32,
}

impl Default for GiftTuning {
    fn default() -> Self {
        Self {
            count: 15,
            speed: 5.0,
            size: 100.0,
            spawn_y_range: 5000.0,
            variants: 4,
            frames: 4,
            frame_hold: 6.0,
        }
    }
}

/// Sweeping sled hazard (phase 2 by default)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SledTuning {
    pub width: f32,
    pub height: f32,
    /// Number of full-width sweeps
    pub passes: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Vertical band the sled's top edge is picked from
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for SledTuning {
    fn default() -> Self {
        Self {
            width: 260.0,
            height: 110.0,
            passes: 6,
            min_speed: 12.0,
            max_speed: 20.0,
            min_y: 150.0,
            max_y: 880.0,
        }
    }
}

/// Delayed replay of the player (phase 3 by default)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostTuning {
    /// Ticks from phase start until the ghost is fully opaque
    pub spawn_delay: u32,
    /// Recording starts this many ticks before `spawn_delay`; also the
    /// number of snapshots buffered before replay begins
    pub capture_offset: u32,
    /// Replayed ticks during which the ghost cannot hurt the player
    pub no_damage_ticks: u32,
}

impl Default for GhostTuning {
    fn default() -> Self {
        Self {
            spawn_delay: 1000,
            capture_offset: 150,
            no_damage_ticks: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    pub reference_fps: f32,
    pub max_delta_frames: f32,
    /// Duration of each phase in milliseconds; surviving them all wins
    pub phase_durations: Vec<u64>,

    // === Player ===
    pub gravity: f32,
    pub player_speed: f32,
    pub jump_force: f32,
    /// Air jumps available after leaving the ground
    pub max_jump_charges: u32,

    // === Hazards ===
    pub gift_phase: usize,
    pub gifts: GiftTuning,
    pub sled_phase: usize,
    pub sled: SledTuning,
    pub ghost_phase: usize,
    pub ghost: GhostTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_fps: REFERENCE_FPS,
            max_delta_frames: MAX_DELTA_FRAMES,
            phase_durations: vec![2000, 20000, 20000, 25000],

            gravity: 2.0,
            player_speed: 10.0,
            jump_force: 30.0,
            max_jump_charges: 1,

            gift_phase: 1,
            gifts: GiftTuning::default(),
            sled_phase: 2,
            sled: SledTuning::default(),
            ghost_phase: 3,
            ghost: GhostTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Number of timed phases
    pub fn phase_count(&self) -> usize {
        self.phase_durations.len()
    }

    /// Milliseconds per unit of delta-time
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.reference_fps as f64
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidTuning(msg));

        if self.phase_durations.is_empty() {
            return invalid("at least one phase duration is required".into());
        }
        for (name, value) in [
            ("reference_fps", self.reference_fps),
            ("max_delta_frames", self.max_delta_frames),
            ("gravity", self.gravity),
            ("player_speed", self.player_speed),
            ("jump_force", self.jump_force),
            ("gifts.speed", self.gifts.speed),
            ("gifts.size", self.gifts.size),
            ("gifts.spawn_y_range", self.gifts.spawn_y_range),
            ("gifts.frame_hold", self.gifts.frame_hold),
            ("sled.width", self.sled.width),
            ("sled.height", self.sled.height),
            ("sled.min_speed", self.sled.min_speed),
            ("sled.max_speed", self.sled.max_speed),
            ("sled.min_y", self.sled.min_y),
            ("sled.max_y", self.sled.max_y),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if !(self.reference_fps > 0.0) {
            return invalid(format!("reference_fps must be positive, got {}", self.reference_fps));
        }
        if !(self.max_delta_frames > 0.0) {
            return invalid(format!(
                "max_delta_frames must be positive, got {}",
                self.max_delta_frames
            ));
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("player_speed", self.player_speed),
            ("jump_force", self.jump_force),
            ("gifts.speed", self.gifts.speed),
            ("sled.min_speed", self.sled.min_speed),
            ("sled.max_speed", self.sled.max_speed),
        ] {
            if value < 0.0 {
                return invalid(format!("{name} must not be negative, got {value}"));
            }
        }
        if self.sled.min_speed > self.sled.max_speed {
            return invalid("sled.min_speed exceeds sled.max_speed".into());
        }
        if self.sled.min_y > self.sled.max_y {
            return invalid("sled.min_y exceeds sled.max_y".into());
        }
        if self.gifts.frames == 0 || self.gifts.variants == 0 {
            return invalid("gift frames and variants must be at least 1".into());
        }
        if self.ghost.capture_offset > self.ghost.spawn_delay {
            return invalid(format!(
                "ghost.capture_offset ({}) exceeds ghost.spawn_delay ({})",
                self.ghost.capture_offset, self.ghost.spawn_delay
            ));
        }
        let phases = self.phase_count();
        for (name, index) in [
            ("gift_phase", self.gift_phase),
            ("sled_phase", self.sled_phase),
            ("ghost_phase", self.ghost_phase),
        ] {
            if index >= phases {
                return invalid(format!("{name} {index} is outside 0..{phases}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.phase_count(), 4);
        assert!((tuning.frame_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 12.0, "gifts": { "count": 3 } }"#)
            .expect("valid json");
        assert_eq!(tuning.player_speed, 12.0);
        assert_eq!(tuning.gifts.count, 3);
        assert_eq!(tuning.gifts.speed, 5.0);
        assert_eq!(tuning.phase_durations, vec![2000, 20000, 20000, 25000]);
    }

    #[test]
    fn test_rejects_empty_phases() {
        let err = Tuning::from_json(r#"{ "phase_durations": [] }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_hazard_phase_out_of_range() {
        let tuning = Tuning {
            phase_durations: vec![2000, 20000],
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_ghost_offset_past_delay() {
        let mut tuning = Tuning::default();
        tuning.ghost.capture_offset = tuning.ghost.spawn_delay + 1;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_sled_ranges() {
        let mut tuning = Tuning::default();
        tuning.sled.min_speed = 20.0;
        tuning.sled.max_speed = 12.0;
        assert!(matches!(tuning.validate(), Err(GameError::InvalidTuning(_))));

        let mut tuning = Tuning::default();
        tuning.sled.min_y = 900.0;
        tuning.sled.max_y = 100.0;
        assert!(matches!(tuning.validate(), Err(GameError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_bad_max_delta() {
        for bad in [-1.0, 0.0, f32::NAN] {
            let tuning = Tuning {
                max_delta_frames: bad,
                ..Default::default()
            };
            assert!(matches!(tuning.validate(), Err(GameError::InvalidTuning(_))));
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let tuning = Tuning {
            gravity: f32::INFINITY,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
        let mut tuning = Tuning::default();
        tuning.sled.min_y = f32::NAN;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{"), Err(GameError::Parse(_))));
    }
}
