//! Scene registry: the flat set of drawable entities the external renderer
//! consumes each tick.
//!
//! Entities are keyed by string identifier and kept in insertion order so
//! paint order (and every walk over the registry) is deterministic. The
//! registry holds no game logic.

use serde::{Deserialize, Serialize};

use crate::game::assets::ImageKey;
use crate::game::types::SourceRect;

/// What an entity looks like. The renderer matches on this exhaustively;
/// the core never needs per-variant dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect {
        color: String,
    },
    Image {
        image: ImageKey,
    },
    Sprite {
        image: ImageKey,
        source: SourceRect,
    },
    Text {
        text: String,
        font: String,
        style: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub hidden: bool,
    pub shape: Shape,
}

impl Entity {
    pub fn new(id: impl Into<String>, x: i32, y: i32, width: i32, height: i32, shape: Shape) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            hidden: false,
            shape,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity. An existing entity with the same id is replaced in
    /// place, keeping its paint-order slot.
    pub fn add(&mut self, entity: Entity) {
        if let Some(slot) = self.entities.iter_mut().find(|e| e.id == entity.id) {
            *slot = entity;
        } else {
            self.entities.push(entity);
        }
    }

    /// Remove by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// All live entities in paint order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: &str) -> Entity {
        Entity::new(id, 0, 0, 10, 10, Shape::Rect { color: "black".into() })
    }

    #[test]
    fn add_replaces_in_place() {
        let mut scene = Scene::new();
        scene.add(rect("a"));
        scene.add(rect("b"));
        let mut replacement = rect("a");
        replacement.x = 99;
        scene.add(replacement);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.entities()[0].id, "a");
        assert_eq!(scene.entities()[0].x, 99);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut scene = Scene::new();
        scene.add(rect("a"));
        assert!(scene.remove("a"));
        assert!(!scene.remove("a"));
        assert!(scene.is_empty());
    }
}
