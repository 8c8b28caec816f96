//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; there is no ambient
//! global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationClip, AnimationName, Animator, CharacterAnimation, Facing, SpriteKey};
use super::ghost::GhostRecorder;
use super::input::InputTracker;
use super::phase::build_hazard_sets;
use super::transform::Transform;
use crate::consts::*;
use crate::{GameError, Tuning};

/// A controllable (or replayed) character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// False for the ghost replay
    pub is_main: bool,
    pub body: Transform,
    pub facing: Facing,
    pub animation: CharacterAnimation,
    pub grounded: bool,
    /// Positive is downward
    pub y_velocity: f32,
    /// Air jumps left before landing
    pub jump_charges: u32,
}

impl Player {
    pub fn new(body: Transform, max_jump_charges: u32) -> Self {
        Self {
            is_main: true,
            body,
            facing: Facing::Left,
            animation: CharacterAnimation::default(),
            grounded: false,
            y_velocity: 0.0,
            jump_charges: max_jump_charges,
        }
    }

    /// Player hitbox centred on the canvas
    pub fn spawn(max_jump_charges: u32) -> Self {
        Self::new(
            Transform::new(
                CANVAS_WIDTH / 2.0,
                CANVAS_HEIGHT / 2.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            max_jump_charges,
        )
    }

    /// Switch animation, respecting the grounded guard
    pub fn request_animation(&mut self, name: AnimationName) -> bool {
        self.animation.request(name, self.grounded)
    }

    pub fn sprite_key(&self) -> SpriteKey {
        self.animation.sprite_key(self.facing)
    }
}

/// Held movement intents. `jump` is a pending edge, cleared once consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Intents {
    /// Exactly one horizontal direction held
    pub fn horizontal(&self) -> Option<Facing> {
        match (self.left, self.right) {
            (true, false) => Some(Facing::Left),
            (false, true) => Some(Facing::Right),
            _ => None,
        }
    }

    pub fn any_horizontal(&self) -> bool {
        self.left || self.right
    }
}

/// How a hazard is presented; also tells hazards apart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardLook {
    /// A falling gift; `frame_offset` desynchronises the sparkle cycle
    Gift { variant: u32, frame_offset: u32 },
    Sled,
    /// The delayed player replay
    Ghost { sprite: SpriteKey, opacity: f32 },
}

/// Anything that ends the session on contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub body: Transform,
    pub look: HazardLook,
    /// Non-lethal hazards are drawn but never collide
    pub lethal: bool,
}

impl Hazard {
    pub fn new(body: Transform, look: HazardLook) -> Self {
        Self {
            body,
            look,
            lethal: true,
        }
    }

    /// Sleds face the direction they are travelling
    pub fn facing(&self) -> Facing {
        match self.body.current_target() {
            Some(target) if target.x > self.body.pos.x => Facing::Right,
            _ => Facing::Left,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every phase survived
    Victory,
    /// Hit by a hazard
    Defeat { phases_survived: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    Over(Outcome),
}

/// The fixed level: two side walls and five ledges
pub fn default_platforms() -> Vec<Transform> {
    vec![
        // Side walls
        Transform::new(0.0, 0.0, WALL_WIDTH, CANVAS_HEIGHT),
        Transform::new(CANVAS_WIDTH - WALL_WIDTH, 0.0, WALL_WIDTH, CANVAS_HEIGHT),
        // Ledges
        Transform::new(300.0, 800.0, 300.0, 100.0),
        Transform::new(CANVAS_WIDTH - 600.0, 800.0, 300.0, 100.0),
        Transform::new(CANVAS_WIDTH / 2.0 - 100.0, 500.0, 200.0, 100.0),
        Transform::new(200.0, 200.0, 300.0, 100.0),
        Transform::new(CANVAS_WIDTH - 500.0, 200.0, 300.0, 100.0),
    ]
}

/// Complete game state (deterministic for a given tuning and seed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the hazard layout was generated from
    pub seed: u64,
    pub platforms: Vec<Transform>,
    pub player: Player,
    pub intents: Intents,
    pub input: InputTracker,
    /// Current phase index, `0..=phase_count`
    pub phase: usize,
    /// Timestamp (ms) the current phase began
    pub phase_started_ms: f64,
    /// Timestamp (ms) of the previous tick, `None` before the first one
    pub last_tick_ms: Option<f64>,
    /// Delta-time used by the most recent tick
    pub delta: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// One hazard set per phase
    pub hazard_sets: Vec<Vec<Hazard>>,
    /// Shared gift sparkle cycle
    pub gift_sparkle: Animator,
    pub ghost: GhostRecorder,
    pub status: SessionStatus,
}

impl GameState {
    /// Create a new game with the default level. Fails if `tuning` does
    /// not validate.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, GameError> {
        Self::with_platforms(tuning, seed, default_platforms())
    }

    pub fn with_platforms(
        tuning: Tuning,
        seed: u64,
        platforms: Vec<Transform>,
    ) -> Result<Self, GameError> {
        tuning.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let hazard_sets = build_hazard_sets(&tuning, &mut rng);
        let sparkle = AnimationClip::new(tuning.gifts.frames, tuning.gifts.frame_hold, true);

        Ok(Self {
            player: Player::spawn(tuning.max_jump_charges),
            seed,
            platforms,
            intents: Intents::default(),
            input: InputTracker::default(),
            phase: 0,
            phase_started_ms: 0.0,
            last_tick_ms: None,
            delta: 0.0,
            time_ticks: 0,
            hazard_sets,
            gift_sparkle: Animator::new(sparkle),
            ghost: GhostRecorder::default(),
            status: SessionStatus::Running,
            tuning,
        })
    }

    /// Restart the phase clock: phase 0, beginning at `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.phase = 0;
        self.phase_started_ms = now_ms;
        self.last_tick_ms = None;
        self.status = SessionStatus::Running;
        log::info!("Session started (seed {})", self.seed);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, SessionStatus::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            SessionStatus::Over(outcome) => Some(outcome),
            SessionStatus::Running => None,
        }
    }

    /// Hazards of the current phase (empty once every phase is done)
    pub fn active_hazards(&self) -> &[Hazard] {
        self.hazard_sets
            .get(self.phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Top-left of the player hitbox
    pub fn player_pos(&self) -> Vec2 {
        self.player.body.pos
    }
}
