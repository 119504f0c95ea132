//! Per-tick input snapshots and the fixed per-player control schemes.
//!
//! The core never listens for events itself: the embedding layer hands
//! `Game::run` a snapshot of which key codes are currently held.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::game::types::PlayerId;

pub type KeyCode = u16;

/// One player's key bindings. The four schemes are fixed and not
/// configurable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: KeyCode,
    pub up: KeyCode,
    pub right: KeyCode,
    pub down: KeyCode,
    pub attack: KeyCode,
}

impl Controls {
    pub fn for_player(id: PlayerId) -> Controls {
        match id {
            // arrows + enter
            PlayerId::P1 => Controls { left: 37, up: 38, right: 39, down: 40, attack: 13 },
            // wasd + tab
            PlayerId::P2 => Controls { left: 65, up: 87, right: 68, down: 83, attack: 9 },
            // fthg + r
            PlayerId::P3 => Controls { left: 70, up: 84, right: 72, down: 71, attack: 82 },
            // jilk + u
            PlayerId::P4 => Controls { left: 74, up: 73, right: 76, down: 75, attack: 85 },
        }
    }
}

/// Snapshot of held keys for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keys = InputState::new();
        let attack = Controls::for_player(PlayerId::P1).attack;
        keys.press(attack);
        assert!(keys.is_held(attack));
        keys.release(attack);
        assert!(!keys.is_held(attack));
    }

    #[test]
    fn schemes_do_not_overlap() {
        let mut seen = HashSet::new();
        for id in PlayerId::ALL {
            let c = Controls::for_player(id);
            for key in [c.left, c.up, c.right, c.down, c.attack] {
                assert!(seen.insert(key), "key {key} bound twice");
            }
        }
    }
}
