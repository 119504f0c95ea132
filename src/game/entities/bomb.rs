//! Bomb entity and its four explosion-fragment chains.
//!
//! A bomb snaps to the grid on creation, arms, detonates after its timeout
//! and despawns after a further delay. Detonation grows one fragment chain
//! per direction; each chain is a `Vec` arena indexed by distance from the
//! center, so truncation at an obstacle is an index-range drop rather than
//! pointer surgery. The state machine itself (arm, blow, despawn, chain
//! reactions) lives in `systems::explosion`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::game::{BLOW_TIMEOUT_MS, BOMB_WALK_SPEED, FRAGMENT_TIMEOUT_MS};
use crate::game::grid;
use crate::game::scheduler::EventId;
use crate::game::types::{Direction, PlayerId, Position};

/// One exploded cell beyond a bomb's center. Despawned fragments stay in
/// the chain flagged dead so indices remain stable, but never register a
/// hit again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub horizontal: bool,
    pub timeout: u64,
    pub armed: bool,
    pub alive: bool,
}

impl Fragment {
    pub fn new(x: i32, y: i32, horizontal: bool) -> Self {
        Self {
            x,
            y,
            horizontal,
            timeout: FRAGMENT_TIMEOUT_MS,
            armed: false,
            alive: true,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Registry id of this fragment's visual, derived from its cell.
    pub fn scene_id(&self) -> String {
        format!("bombFrag{}", grid::to_label(self.x, self.y))
    }
}

/// The four directional chains, heads at distance one from the center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explosion {
    pub left: Vec<Fragment>,
    pub right: Vec<Fragment>,
    pub up: Vec<Fragment>,
    pub down: Vec<Fragment>,
}

impl Explosion {
    pub fn chain(&self, direction: Direction) -> &Vec<Fragment> {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    pub fn chain_mut(&mut self, direction: Direction) -> &mut Vec<Fragment> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    /// All chains in the fixed propagation order.
    pub fn chains(&self) -> [(Direction, &[Fragment]); 4] {
        [
            (Direction::Left, self.left.as_slice()),
            (Direction::Right, self.right.as_slice()),
            (Direction::Up, self.up.as_slice()),
            (Direction::Down, self.down.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: String,
    pub owner: PlayerId,
    pub x: i32,
    pub y: i32,
    pub range: i32,
    pub timeout: u64,
    pub blow_timeout: u64,
    /// Has detonated; guarded so a second detonation is a no-op.
    pub blows: bool,
    /// Kickable once the owner has walked off the cell.
    pub can_be_moved: bool,
    pub moving: bool,
    pub walk_speed: i32,
    pub explosion: Explosion,
    pub arm_handle: Option<EventId>,
    pub blow_handle: Option<EventId>,
    pub move_handle: Option<EventId>,
}

impl Bomb {
    /// Build a bomb at the requester's position snapped to the grid.
    pub fn new(owner: PlayerId, x: i32, y: i32, range: i32, timeout: u64) -> Self {
        let x = grid::nearest_grid_multiple(x, &[]);
        let y = grid::nearest_grid_multiple(y, &[]);
        let id = format!(
            "bomb{}_{}",
            grid::to_label(x, y),
            Uuid::new_v4().simple()
        );
        Self {
            id,
            owner,
            x,
            y,
            range,
            timeout,
            blow_timeout: BLOW_TIMEOUT_MS,
            blows: false,
            can_be_moved: false,
            moving: false,
            walk_speed: BOMB_WALK_SPEED,
            explosion: Explosion::default(),
            arm_handle: None,
            blow_handle: None,
            move_handle: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}
