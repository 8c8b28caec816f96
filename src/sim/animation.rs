//! Sprite-frame animation
//!
//! An `Animator` steps through the frames of one `AnimationClip` at a time.
//! The player owns one keyed by `AnimationName`; gifts share an anonymous
//! looping one for their sparkle cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationName {
    Idle,
    Walk,
    Jump,
    DoubleJump,
}

impl AnimationName {
    pub const ALL: [AnimationName; 4] = [
        AnimationName::Idle,
        AnimationName::Walk,
        AnimationName::Jump,
        AnimationName::DoubleJump,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationName::Idle => "idle",
            AnimationName::Walk => "walk",
            AnimationName::Jump => "jump",
            AnimationName::DoubleJump => "double-jump",
        }
    }

    /// Jump animations may start while airborne
    pub fn is_jump(&self) -> bool {
        matches!(self, AnimationName::Jump | AnimationName::DoubleJump)
    }

    pub fn clip(&self) -> AnimationClip {
        match self {
            AnimationName::Idle => AnimationClip::new(8, 8.0, true),
            AnimationName::Walk => AnimationClip::new(11, 3.0, true),
            AnimationName::Jump => AnimationClip::new(5, 3.0, false),
            AnimationName::DoubleJump => AnimationClip::new(6, 3.0, false),
        }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Identifies one player sprite: animation, frame and facing.
///
/// Displays as `{name}{frame}-{facing}`, e.g. `walk3-right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteKey {
    pub animation: AnimationName,
    pub frame: u32,
    pub facing: Facing,
}

impl SpriteKey {
    pub fn new(animation: AnimationName, frame: u32, facing: Facing) -> Self {
        Self {
            animation,
            frame,
            facing,
        }
    }

    /// Every valid key, in animation / frame / facing order
    pub fn all() -> impl Iterator<Item = SpriteKey> {
        AnimationName::ALL.into_iter().flat_map(|animation| {
            (0..animation.clip().frames).flat_map(move |frame| {
                [Facing::Left, Facing::Right]
                    .into_iter()
                    .map(move |facing| SpriteKey::new(animation, frame, facing))
            })
        })
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}",
            self.animation.as_str(),
            self.frame,
            self.facing.as_str()
        )
    }
}

/// Frame count, hold time and looping of an animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub frames: u32,
    /// Delta-time units each frame stays on screen
    pub hold: f32,
    pub looping: bool,
}

impl AnimationClip {
    pub const fn new(frames: u32, hold: f32, looping: bool) -> Self {
        Self {
            frames,
            hold,
            looping,
        }
    }
}

/// Playback state for one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    clip: AnimationClip,
    frame: u32,
    elapsed: f32,
    finished: bool,
}

impl Animator {
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            frame: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn clip(&self) -> AnimationClip {
        self.clip
    }

    /// Start `clip` from its first frame
    pub fn restart(&mut self, clip: AnimationClip) {
        self.clip = clip;
        self.frame = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }

    /// Advance playback by `dt`. A non-looping clip freezes on its last frame.
    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.clip.hold {
            self.elapsed = 0.0;
            self.frame += 1;
            if self.frame >= self.clip.frames {
                if self.clip.looping {
                    self.frame = 0;
                } else {
                    self.frame = self.clip.frames.saturating_sub(1);
                    self.finished = true;
                }
            }
        }
    }
}

/// The player's animation: a named clip plus its playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterAnimation {
    name: AnimationName,
    animator: Animator,
}

impl Default for CharacterAnimation {
    fn default() -> Self {
        Self::new(AnimationName::Idle)
    }
}

impl CharacterAnimation {
    pub fn new(name: AnimationName) -> Self {
        Self {
            name,
            animator: Animator::new(name.clip()),
        }
    }

    pub fn name(&self) -> AnimationName {
        self.name
    }

    pub fn frame(&self) -> u32 {
        self.animator.frame()
    }

    pub fn finished(&self) -> bool {
        self.animator.finished()
    }

    /// Request a switch to `name`.
    ///
    /// Ignored when `name` is already playing, and when airborne unless
    /// `name` is a jump animation. Returns whether the switch happened.
    pub fn request(&mut self, name: AnimationName, grounded: bool) -> bool {
        if name == self.name || (!grounded && !name.is_jump()) {
            return false;
        }
        self.name = name;
        self.animator.restart(name.clip());
        true
    }

    pub fn update(&mut self, dt: f32) {
        self.animator.update(dt);
    }

    pub fn sprite_key(&self, facing: Facing) -> SpriteKey {
        SpriteKey::new(self.name, self.frame(), facing)
    }
}
