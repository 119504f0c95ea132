use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Fixed processing order for explosion propagation.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn sign(self) -> i32 {
        match self {
            Direction::Left | Direction::Up => -1,
            Direction::Right | Direction::Down => 1,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Sub-rectangle of a sprite sheet selecting one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Bombs,
    Ranges,
    Speed,
    BombSpeed,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Bombs,
        PowerUpKind::Ranges,
        PowerUpKind::Speed,
        PowerUpKind::BombSpeed,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    P1,
    P2,
    P3,
    P4,
}

impl PlayerId {
    /// Fixed per-tick processing order.
    pub const ALL: [PlayerId; 4] = [PlayerId::P1, PlayerId::P2, PlayerId::P3, PlayerId::P4];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerId::P1 => "p1",
            PlayerId::P2 => "p2",
            PlayerId::P3 => "p3",
            PlayerId::P4 => "p4",
        }
    }

    /// Corner cell each player starts the round on.
    pub fn spawn_label(self) -> &'static str {
        match self {
            PlayerId::P1 => "A1",
            PlayerId::P2 => "M13",
            PlayerId::P3 => "M1",
            PlayerId::P4 => "A13",
        }
    }

    /// Horizontal offset of this player's column in the shared sprite sheet.
    pub fn sheet_offset(self) -> i32 {
        match self {
            PlayerId::P1 => 0,
            PlayerId::P2 => 96,
            PlayerId::P3 => 192,
            PlayerId::P4 => 288,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
