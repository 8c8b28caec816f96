//! Sprite lookup
//!
//! Every `SpriteKey` maps to one image. The table is filled once at startup
//! (before the first frame) so a missing asset is known up front instead of
//! showing up mid-game.

use std::collections::HashMap;

use crate::sim::SpriteKey;

/// Something that can hand out a drawable image for a sprite key
pub trait AssetProvider {
    type Handle;

    fn sprite(&self, key: &SpriteKey) -> Option<&Self::Handle>;
}

/// Asset path of a player sprite, e.g. `./img/player/idle0-left.png`
pub fn player_sprite_path(key: &SpriteKey) -> String {
    format!("./img/player/{key}.png")
}

/// Preloaded player sprites
#[derive(Debug, Clone)]
pub struct SpriteTable<H> {
    images: HashMap<SpriteKey, H>,
}

impl<H> SpriteTable<H> {
    /// Load every player sprite key through `loader`, which receives the key
    /// and its asset path. Keys the loader rejects are logged and skipped.
    pub fn load<F, E>(mut loader: F) -> Self
    where
        F: FnMut(&SpriteKey, &str) -> Result<H, E>,
        E: std::fmt::Debug,
    {
        let mut images = HashMap::new();
        for key in SpriteKey::all() {
            let path = player_sprite_path(&key);
            match loader(&key, &path) {
                Ok(handle) => {
                    images.insert(key, handle);
                }
                Err(e) => log::warn!("Failed to load sprite {}: {:?}", path, e),
            }
        }
        log::debug!("Loaded {} player sprites", images.len());
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl<H> AssetProvider for SpriteTable<H> {
    type Handle = H;

    fn sprite(&self, key: &SpriteKey) -> Option<&H> {
        self.images.get(key)
    }
}
