/// Game configuration constants.
///
/// This module defines the main gameplay parameters: grid geometry, tick
/// length, bomb timings, power-up limits and default player stats.

/// Width and height of the square playfield, in pixels.
pub const GAME_SIZE: i32 = 780;

/// Number of rows (and columns) in the game grid.
pub const NR_ROWS: i32 = 13;

/// Side of one grid cell, in pixels.
pub const BLOCK_SIZE: i32 = GAME_SIZE / NR_ROWS;

/// Length of one simulation tick, in milliseconds.
pub const TICK_MS: u64 = 20;

/// Delay between arming a bomb and its detonation.
pub const BOMB_TIMEOUT_MS: u64 = 3000;

/// Delay between detonation and removal of the bomb itself.
pub const BLOW_TIMEOUT_MS: u64 = 1000;

/// Lifetime of one explosion fragment after it is armed.
pub const FRAGMENT_TIMEOUT_MS: u64 = 1000;

/// Pixels a kicked bomb travels per step.
pub const BOMB_WALK_SPEED: i32 = 6;

/// Interval between two steps of a kicked bomb.
pub const BOMB_STEP_MS: u64 = 20;

/// Interval at which a freshly placed bomb re-checks whether its owner
/// has walked off the cell (at which point it becomes kickable).
pub const KICKABLE_POLL_MS: u64 = 250;

/// Share of all grid cells turned into destructible blocks per level.
pub const BLOCK_FILL_RATIO: f64 = 0.5;

/// Per-type caps on the number of power-ups placed per level.
pub const POWER_UP_LIMIT_BOMBS: usize = 8;
pub const POWER_UP_LIMIT_RANGES: usize = 4;
pub const POWER_UP_LIMIT_SPEED: usize = 5;
pub const POWER_UP_LIMIT_BOMB_SPEED: usize = 5;

/// Default player stats at round start.
pub const DEFAULT_LIVES: i32 = 1;
pub const DEFAULT_SPEED: i32 = 1;
pub const DEFAULT_RANGE: i32 = 1;
pub const DEFAULT_BOMBS: i32 = 1;
pub const DEFAULT_BOMB_SPEED: i32 = 0;

/// Flat per-tick movement increment added to a player's speed stat.
pub const BASE_MOVE_STEP: i32 = 3;

/// Number of animation frames in a player walk cycle.
pub const PLAYER_FRAMES: u32 = 3;

/// Grid-multiple indices that are skipped when snapping a player back to
/// the grid mid-move. Odd indices are the half-step positions used while
/// interpolating between two cells.
pub const HALF_STEP_FORBIDDEN: [i32; 6] = [1, 3, 5, 7, 9, 11];

/// Length of the per-player session code.
pub const PLAYER_CODE_LEN: usize = 4;

/// Dimensions of one per-player HUD panel, in pixels.
pub const HUD_PANEL_WIDTH: i32 = 200;
pub const HUD_PANEL_HEIGHT: i32 = 200;
