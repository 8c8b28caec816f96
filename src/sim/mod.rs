//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the timestamp handed to `tick`
//! - Seeded RNG only, and only while building hazard sets
//! - Stable iteration order (platforms and hazards in construction order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod ghost;
pub mod input;
pub mod phase;
pub mod physics;
pub mod state;
pub mod tick;
pub mod transform;

pub use animation::{AnimationClip, AnimationName, Animator, CharacterAnimation, Facing, SpriteKey};
pub use collision::{Gaps, directional_gaps};
pub use ghost::{GhostRecorder, GhostSnapshot};
pub use input::{Button, InputTracker, press, release};
pub use phase::{build_hazard_sets, direct_phase};
pub use physics::step_player;
pub use state::{GameState, Hazard, HazardLook, Intents, Outcome, Player, SessionStatus};
pub use tick::{delta_time, tick};
pub use transform::Transform;
