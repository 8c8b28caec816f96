//! Axis-aligned rectangles with an optional waypoint path
//!
//! Platforms, the player hitbox and every hazard are `Transform`s. A hazard
//! walks its waypoint list one leg at a time and goes inert once the list is
//! exhausted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// A mutable rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec2,
    pub size: Vec2,
    /// Waypoint positions, visited in order
    targets: Vec<Vec2>,
    /// Speed of the leg leading to `targets[i]` (units per reference frame)
    speeds: Vec<f32>,
    target_index: usize,
}

impl Transform {
    /// A static rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            targets: Vec::new(),
            speeds: Vec::new(),
            target_index: 0,
        }
    }

    /// A rectangle following `targets`, one speed per leg.
    pub fn with_path(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        targets: Vec<Vec2>,
        speeds: Vec<f32>,
    ) -> Result<Self, GameError> {
        if targets.len() != speeds.len() {
            return Err(GameError::PathLength {
                targets: targets.len(),
                speeds: speeds.len(),
            });
        }
        Ok(Self {
            targets,
            speeds,
            ..Self::new(x, y, width, height)
        })
    }

    /// A rectangle following `(target, speed)` legs; cannot mismatch.
    pub fn with_legs(x: f32, y: f32, width: f32, height: f32, legs: Vec<(Vec2, f32)>) -> Self {
        let (targets, speeds): (Vec<Vec2>, Vec<f32>) = legs.into_iter().unzip();
        Self {
            targets,
            speeds,
            ..Self::new(x, y, width, height)
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn targets(&self) -> &[Vec2] {
        &self.targets
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// The waypoint currently being approached, if any
    pub fn current_target(&self) -> Option<Vec2> {
        self.targets.get(self.target_index).copied()
    }

    /// True once every waypoint has been reached
    pub fn is_inert(&self) -> bool {
        self.target_index >= self.targets.len()
    }

    /// Strict AABB overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Transform) -> bool {
        self.right() > other.pos.x
            && self.pos.x < other.right()
            && self.bottom() > other.pos.y
            && self.pos.y < other.bottom()
    }

    /// Advance one tick along the waypoint path.
    ///
    /// Each axis steps by the full leg speed toward the target, so diagonal
    /// legs run faster than `speed`. Once both axes are within one step the
    /// waypoint counts as reached and the next leg starts on the following
    /// tick, without snapping onto the target.
    pub fn follow_path(&mut self, dt: f32) {
        let (Some(target), Some(&speed)) = (
            self.targets.get(self.target_index),
            self.speeds.get(self.target_index),
        ) else {
            return;
        };

        let step = speed * dt;
        let delta = *target - self.pos;
        if delta.x.abs() > step || delta.y.abs() > step {
            self.pos += Vec2::new(sign(delta.x), sign(delta.y)) * step;
        } else {
            self.target_index += 1;
        }
    }
}

/// Sign with zero mapped to zero (`f32::signum` maps 0.0 to 1.0)
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
