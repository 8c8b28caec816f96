//! Yule Escape - A phase-based 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, hazards, ghost, game state)
//! - `renderer`: Render sink contract and sprite lookup
//! - `platform`: Browser key mapping
//! - `session`: Page switching and end-of-game reporting
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use session::{Page, Session, SessionController};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Canvas size in world units (the world is exactly the canvas)
    pub const CANVAS_WIDTH: f32 = 1920.0;
    pub const CANVAS_HEIGHT: f32 = 1080.0;

    /// Frame rate that one unit of delta-time corresponds to
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest delta-time accepted in one tick (frames)
    pub const MAX_DELTA_FRAMES: f32 = 3.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 97.5;
    pub const PLAYER_HEIGHT: f32 = 135.0;
    /// Player sprite (wider than the hitbox, centred on it)
    pub const PLAYER_SPRITE_WIDTH: f32 = 127.5;
    pub const PLAYER_SPRITE_HEIGHT: f32 = 135.0;

    /// Side wall thickness
    pub const WALL_WIDTH: f32 = 50.0;
}
