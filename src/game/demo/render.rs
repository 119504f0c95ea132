//! Game rendering system (terminal).
//!
//! Projects the scene registry onto a character grid, one glyph per cell.
//! Entities are walked in paint order, so whatever the core painted last
//! on a cell wins, same as a pixel renderer would resolve it.

use crate::config::game::{BLOCK_SIZE, NR_ROWS};
use crate::game::assets::ImageKey;
use crate::game::entities::player::Player;
use crate::game::scene::{Scene, Shape};

/// Print the playfield to the terminal.
pub fn print_scene(scene: &Scene) {
    let mut grid = vec![vec!['.'; NR_ROWS as usize]; NR_ROWS as usize];

    for entity in scene.entities() {
        if entity.hidden {
            continue;
        }
        let Some(symbol) = glyph(&entity.shape, &entity.id) else {
            continue;
        };
        let col = entity.x / BLOCK_SIZE;
        let row = entity.y / BLOCK_SIZE;
        if (0..NR_ROWS).contains(&col) && (0..NR_ROWS).contains(&row) {
            grid[row as usize][col as usize] = symbol;
        }
    }

    for row in grid {
        let line: String = row.iter().flat_map(|c| [*c, ' ']).collect();
        println!("{}", line.trim_end());
    }
    println!();
}

/// Pick a glyph for one entity, or None for entities that do not occupy a
/// cell (the background, HUD text).
fn glyph(shape: &Shape, id: &str) -> Option<char> {
    match shape {
        Shape::Image { image } => match image {
            ImageKey::IceBlock => Some('#'),
            ImageKey::Ice => Some('%'),
            ImageKey::Bomb => Some('o'),
            ImageKey::BombExplosionCenter
            | ImageKey::BombExplosionHorizontal
            | ImageKey::BombExplosionVertical => Some('*'),
            ImageKey::PuBomb => Some('b'),
            ImageKey::PuRange => Some('r'),
            ImageKey::PuSpeed => Some('s'),
            ImageKey::PuWalkBombs => Some('w'),
            ImageKey::Background | ImageKey::GameOver => None,
            _ => Some('?'),
        },
        Shape::Sprite { image, .. } => match image {
            ImageKey::Skull => Some('x'),
            // player entities are keyed "p1".."p4"
            ImageKey::Players => id.chars().nth(1),
            _ => Some('?'),
        },
        Shape::Rect { .. } | Shape::Text { .. } => None,
    }
}

/// Print the state of a single player.
pub fn print_player_state(player: &Player) {
    println!("--- {} [{}] ---", player.id, player.code);
    println!("Position: ({}, {})", player.x, player.y);
    println!(
        "Score: {}  Bombs: {}  Range: {}  Speed: {}  Kick: {}",
        player.score, player.bombs, player.range, player.speed, player.bomb_speed
    );
    if player.dead {
        println!("DEFEATED");
    }
    println!();
}
