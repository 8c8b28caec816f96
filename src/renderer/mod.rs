//! Render sink contract
//!
//! The simulation decides what is drawn and where; a `RenderSink` decides
//! how. `render_frame` walks a `GameState` once per tick and emits draw
//! calls in painter's order.

pub mod sprites;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Facing, GameState, HazardLook, SpriteKey, Transform};

pub use sprites::{AssetProvider, SpriteTable, player_sprite_path};

/// Screen rectangle in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl From<&Transform> for DrawRect {
    fn from(t: &Transform) -> Self {
        Self {
            pos: t.pos,
            size: t.size,
        }
    }
}

/// Phase-specific presentation of a hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardSprite {
    Gift { variant: u32, frame: u32 },
    Sled { facing: Facing },
    Ghost { sprite: SpriteKey, opacity: f32 },
}

pub trait RenderSink {
    fn clear(&mut self);
    fn draw_player(&mut self, sprite: SpriteKey, rect: DrawRect);
    fn draw_platform(&mut self, rect: DrawRect);
    fn draw_hazard(&mut self, rect: DrawRect, sprite: HazardSprite);
}

/// Where the player sprite goes: wider than the hitbox, centred on it
pub fn player_draw_rect(body: &Transform) -> DrawRect {
    DrawRect {
        pos: Vec2::new(
            body.pos.x - (PLAYER_SPRITE_WIDTH - body.size.x) / 2.0,
            body.pos.y,
        ),
        size: Vec2::new(PLAYER_SPRITE_WIDTH, PLAYER_SPRITE_HEIGHT),
    }
}

/// Emit one frame for `state`.
pub fn render_frame<S: RenderSink + ?Sized>(state: &GameState, sink: &mut S) {
    sink.clear();

    sink.draw_player(state.player.sprite_key(), player_draw_rect(&state.player.body));

    for platform in &state.platforms {
        sink.draw_platform(platform.into());
    }

    let sparkle = state.gift_sparkle.frame();
    let frames = state.tuning.gifts.frames.max(1);
    for hazard in state.active_hazards() {
        let sprite = match hazard.look {
            HazardLook::Gift {
                variant,
                frame_offset,
            } => HazardSprite::Gift {
                variant,
                frame: (sparkle + frame_offset) % frames,
            },
            HazardLook::Sled => HazardSprite::Sled {
                facing: hazard.facing(),
            },
            HazardLook::Ghost { sprite, opacity } => HazardSprite::Ghost { sprite, opacity },
        };
        let rect = match hazard.look {
            HazardLook::Ghost { .. } => player_draw_rect(&hazard.body),
            _ => DrawRect::from(&hazard.body),
        };
        sink.draw_hazard(rect, sprite);
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Player(SpriteKey, DrawRect),
    Platform(DrawRect),
    Hazard(DrawRect, HazardSprite),
}

/// Records draw calls instead of painting them (headless runs and tests)
impl RenderSink for Vec<DrawCommand> {
    fn clear(&mut self) {
        Vec::clear(self);
        self.push(DrawCommand::Clear);
    }

    fn draw_player(&mut self, sprite: SpriteKey, rect: DrawRect) {
        self.push(DrawCommand::Player(sprite, rect));
    }

    fn draw_platform(&mut self, rect: DrawRect) {
        self.push(DrawCommand::Platform(rect));
    }

    fn draw_hazard(&mut self, rect: DrawRect, sprite: HazardSprite) {
        self.push(DrawCommand::Hazard(rect, sprite));
    }
}
