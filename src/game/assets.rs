//! Opaque image handles supplied by the external asset loader.
//!
//! The core never touches pixels; it records which image each scene entity
//! refers to via [`ImageKey`] and refuses to start a round until the loader
//! has supplied a handle for every key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKey {
    Background,
    GameOver,
    Skull,
    Bomb,
    BombExplosionCenter,
    BombExplosionHorizontal,
    BombExplosionVertical,
    Ice,
    IceBlock,
    Players,
    PuBomb,
    PuRange,
    PuSpeed,
    PuWalkBombs,
}

impl ImageKey {
    pub const ALL: [ImageKey; 14] = [
        ImageKey::Background,
        ImageKey::GameOver,
        ImageKey::Skull,
        ImageKey::Bomb,
        ImageKey::BombExplosionCenter,
        ImageKey::BombExplosionHorizontal,
        ImageKey::BombExplosionVertical,
        ImageKey::Ice,
        ImageKey::IceBlock,
        ImageKey::Players,
        ImageKey::PuBomb,
        ImageKey::PuRange,
        ImageKey::PuSpeed,
        ImageKey::PuWalkBombs,
    ];
}

/// Opaque drawable reference resolved by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle(pub u64);

/// Catalog of supplied handles; ready once every [`ImageKey`] is covered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assets {
    handles: HashMap<ImageKey, ImageHandle>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with placeholder handles for every key, for renderers that
    /// key off [`ImageKey`] directly (terminal demo, tests).
    pub fn preloaded() -> Self {
        let mut assets = Self::new();
        for (i, key) in ImageKey::ALL.into_iter().enumerate() {
            assets.supply(key, ImageHandle(i as u64));
        }
        assets
    }

    pub fn supply(&mut self, key: ImageKey, handle: ImageHandle) {
        self.handles.insert(key, handle);
    }

    pub fn handle(&self, key: ImageKey) -> Option<ImageHandle> {
        self.handles.get(&key).copied()
    }

    pub fn is_ready(&self) -> bool {
        ImageKey::ALL.iter().all(|key| self.handles.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_only_when_every_key_is_supplied() {
        let mut assets = Assets::new();
        assert!(!assets.is_ready());
        for key in ImageKey::ALL {
            assets.supply(key, ImageHandle(7));
        }
        assert!(assets.is_ready());
    }

    #[test]
    fn preloaded_is_ready() {
        assert!(Assets::preloaded().is_ready());
    }
}
