//! Board: the grid's static and dynamic occupancy.
//!
//! Owns the locked spawn-reserve cells, the indestructible ice blocks, the
//! destructible blocks, power-up placement with per-type caps, and the set
//! of currently live bomb ids. Mutated by explosion and pickup events.

use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::config::game::{
    BLOCK_FILL_RATIO, BLOCK_SIZE, GAME_SIZE, NR_ROWS, POWER_UP_LIMIT_BOMBS,
    POWER_UP_LIMIT_BOMB_SPEED, POWER_UP_LIMIT_RANGES, POWER_UP_LIMIT_SPEED,
};
use crate::game::grid;
use crate::game::types::{Position, PowerUpKind};

/// Cells reserved around the four spawn corners; never destroyed and never
/// covered by generated blocks.
const LOCKED_CELLS: [&str; 12] = [
    "A1", "A2", "B1", "L13", "M12", "M13", "A12", "A13", "B13", "L1", "M1", "M2",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpLimits {
    pub bombs: usize,
    pub ranges: usize,
    pub speed: usize,
    pub bomb_speed: usize,
}

impl Default for PowerUpLimits {
    fn default() -> Self {
        Self {
            bombs: POWER_UP_LIMIT_BOMBS,
            ranges: POWER_UP_LIMIT_RANGES,
            speed: POWER_UP_LIMIT_SPEED,
            bomb_speed: POWER_UP_LIMIT_BOMB_SPEED,
        }
    }
}

/// Per-type cell lists plus their caps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUps {
    pub limits: PowerUpLimits,
    pub bombs: Vec<String>,
    pub ranges: Vec<String>,
    pub speed: Vec<String>,
    pub bomb_speed: Vec<String>,
}

impl PowerUps {
    pub fn cells(&self, kind: PowerUpKind) -> &[String] {
        match kind {
            PowerUpKind::Bombs => &self.bombs,
            PowerUpKind::Ranges => &self.ranges,
            PowerUpKind::Speed => &self.speed,
            PowerUpKind::BombSpeed => &self.bomb_speed,
        }
    }

    pub fn cells_mut(&mut self, kind: PowerUpKind) -> &mut Vec<String> {
        match kind {
            PowerUpKind::Bombs => &mut self.bombs,
            PowerUpKind::Ranges => &mut self.ranges,
            PowerUpKind::Speed => &mut self.speed,
            PowerUpKind::BombSpeed => &mut self.bomb_speed,
        }
    }

    pub fn limit(&self, kind: PowerUpKind) -> usize {
        match kind {
            PowerUpKind::Bombs => self.limits.bombs,
            PowerUpKind::Ranges => self.limits.ranges,
            PowerUpKind::Speed => self.limits.speed,
            PowerUpKind::BombSpeed => self.limits.bomb_speed,
        }
    }

    fn clear_cells(&mut self) {
        self.bombs.clear();
        self.ranges.clear();
        self.speed.clear();
        self.bomb_speed.clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub locked: Vec<String>,
    pub ice_blocks: Vec<String>,
    pub blocks: Vec<String>,
    pub power_ups: PowerUps,
    pub fired_bombs: Vec<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        // Ice blocks sit on every other column of every other row, leaving
        // a lattice of corridors.
        let mut ice_blocks = Vec::new();
        for row in (2..=12).step_by(2) {
            for column in ["B", "D", "F", "H", "J", "L"] {
                ice_blocks.push(format!("{column}{row}"));
            }
        }
        Self {
            locked: LOCKED_CELLS.iter().map(ToString::to_string).collect(),
            ice_blocks,
            blocks: Vec::new(),
            power_ups: PowerUps::default(),
            fired_bombs: Vec::new(),
        }
    }

    /// Regenerate the destructible layer for a new round: half of all cells
    /// become blocks, sampled uniformly outside locked/ice/used cells, each
    /// possibly carrying a power-up.
    pub fn generate_level(&mut self, rng: &mut impl Rng) {
        self.blocks.clear();
        self.fired_bombs.clear();
        self.power_ups.clear_cells();

        let target = ((NR_ROWS * NR_ROWS) as f64 * BLOCK_FILL_RATIO) as usize;
        let mut used: Vec<String> = self
            .ice_blocks
            .iter()
            .chain(self.locked.iter())
            .cloned()
            .collect();

        while self.blocks.len() < target {
            let column = grid::ALPHABET.as_bytes()[rng.random_range(0..NR_ROWS as usize)] as char;
            let row = rng.random_range(1..=NR_ROWS);
            let label = format!("{column}{row}");
            if used.contains(&label) {
                continue;
            }
            used.push(label.clone());
            self.blocks.push(label.clone());
            self.assign_power_up(&label, rng);
        }
        debug!(
            "[Board] level generated: {} blocks, {}/{}/{}/{} power-ups",
            self.blocks.len(),
            self.power_ups.bombs.len(),
            self.power_ups.ranges.len(),
            self.power_ups.speed.len(),
            self.power_ups.bomb_speed.len()
        );
    }

    /// Maybe attach a power-up to a freshly placed block: pick uniformly
    /// among the types still under their cap; with every type exhausted the
    /// block stays plain.
    pub fn assign_power_up(&mut self, label: &str, rng: &mut impl Rng) {
        let candidates: Vec<PowerUpKind> = PowerUpKind::ALL
            .into_iter()
            .filter(|&kind| self.power_ups.cells(kind).len() < self.power_ups.limit(kind))
            .collect();
        if let Some(&kind) = candidates.iter().choose(rng) {
            self.power_ups.cells_mut(kind).push(label.to_string());
        }
    }

    /// Consume a destructible block. A co-located power-up listing stays on
    /// the board until a player picks it up.
    pub fn destroy_block(&mut self, label: &str) {
        self.blocks.retain(|l| l != label);
    }

    /// Static walkability: inside the playfield and clear of blocks and ice
    /// blocks. Locked cells are spawn reserves that players stand on, so
    /// they do not block. Bombs and players are resolved elsewhere.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x > GAME_SIZE - BLOCK_SIZE || y > GAME_SIZE - BLOCK_SIZE {
            return false;
        }
        let point = Position::new(x, y);
        !self
            .blocks
            .iter()
            .chain(self.ice_blocks.iter())
            .any(|label| grid::collides(grid::to_coords(label), point, BLOCK_SIZE))
    }
}
