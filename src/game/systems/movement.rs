//! Player movement and contact resolution.
//!
//! Displacement is resolved one axis at a time; when the tentative
//! position is not walkable the other axis snaps back to the nearest full
//! grid cell before re-testing, which keeps diagonal movement from
//! wedging on corners. Contact resolution runs against the pre-move
//! position so bombs stay solid and kicks push away from the player.

use log::debug;

use crate::config::game::{BASE_MOVE_STEP, BLOCK_SIZE, HALF_STEP_FORBIDDEN};
use crate::game::entities::bomb::Bomb;
use crate::game::grid;
use crate::game::input::{Controls, InputState};
use crate::game::state::Game;
use crate::game::systems::{explosion, hud, rules};
use crate::game::types::{PowerUpKind, Position};

/// One player's slice of the tick: attack, move, refresh HUD and visual.
pub fn run_player(game: &mut Game, index: usize, keys: &InputState) {
    attack(game, index, keys);
    move_player(game, index, keys);
    hud::draw_player_resources(game, index);
    game.sync_player_entity(index);
}

/// Place a bomb at the player's cell if the attack key is held and a bomb
/// is available. The bomb count only drops on successful placement.
fn attack(game: &mut Game, index: usize, keys: &InputState) {
    let player = &game.players[index];
    let ctl = player.controls();
    if !keys.is_held(ctl.attack) || player.bombs <= 0 || player.dead {
        return;
    }
    let bomb = Bomb::new(player.id, player.x, player.y, player.range, player.bomb_timeout);
    let bomb_id = bomb.id.clone();
    if explosion::set_bomb(game, bomb) {
        game.players[index].bombs -= 1;
        explosion::set_bomb_wheels(game, index, &bomb_id);
    }
}

pub fn move_player(game: &mut Game, index: usize, keys: &InputState) {
    if game.players[index].dead {
        return;
    }
    let ctl = game.players[index].controls();
    let step = game.players[index].speed + BASE_MOVE_STEP;
    let original = game.players[index].position();
    let (mut x, mut y) = (original.x, original.y);

    if keys.is_held(ctl.left) {
        x -= step;
    }
    if keys.is_held(ctl.right) {
        x += step;
    }
    if !game.board.is_walkable(x, y) {
        y = grid::nearest_grid_multiple(y, &HALF_STEP_FORBIDDEN);
    }
    if game.board.is_walkable(x, y) {
        game.players[index].x = x;
        game.players[index].y = y;
    }

    if keys.is_held(ctl.up) {
        y -= step;
    }
    if keys.is_held(ctl.down) {
        y += step;
    }
    if !game.board.is_walkable(x, y) {
        x = grid::nearest_grid_multiple(x, &HALF_STEP_FORBIDDEN);
    }
    if game.board.is_walkable(x, y) {
        game.players[index].x = x;
        game.players[index].y = y;
    }

    let any_direction = keys.is_held(ctl.left)
        || keys.is_held(ctl.up)
        || keys.is_held(ctl.right)
        || keys.is_held(ctl.down);
    if any_direction {
        game.players[index].animate(keys);
        colliding_effect(game, index, original, keys);
    }
}

/// Resolve contact after a move: bomb solidity and kicking, explosion
/// death, then power-up pickup.
fn colliding_effect(game: &mut Game, index: usize, original: Position, keys: &InputState) {
    let ctl = game.players[index].controls();
    let fired = game.board.fired_bombs.clone();

    for bomb_id in fired {
        let Some(bomb) = game.bombs.get(&bomb_id) else {
            continue;
        };
        let (center, blows, kickable) = (bomb.position(), bomb.blows, bomb.can_be_moved);
        let player_pos = game.players[index].position();
        let bomb_speed = game.players[index].bomb_speed;

        if !blows && kickable && grid::collides(player_pos, center, BLOCK_SIZE) {
            explosion::stop_moving(game, &bomb_id);
            if bomb_speed > 0 {
                kick(game, &bomb_id, player_pos, center, ctl, keys);
            }
            // bombs are solid: undo the move while still overlapping
            game.players[index].x = original.x;
            game.players[index].y = original.y;
        }

        let player_pos = game.players[index].position();
        if let Some(bomb) = game.bombs.get(&bomb_id) {
            if bomb.blows && explosion::explosion_collision_check(bomb, player_pos) {
                rules::player_dies(game, index);
                return;
            }
        }
    }

    pickup_power_ups(game, index);
}

/// Push an axis-aligned bomb away from the player if the held direction
/// points from the player towards the bomb.
fn kick(
    game: &mut Game,
    bomb_id: &str,
    player: Position,
    bomb: Position,
    ctl: Controls,
    keys: &InputState,
) {
    if player.x == bomb.x {
        if player.y > bomb.y && keys.is_held(ctl.up) {
            explosion::step_bomb(game, bomb_id, -1, false);
        } else if player.y < bomb.y && keys.is_held(ctl.down) {
            explosion::step_bomb(game, bomb_id, 1, false);
        }
    } else if player.y == bomb.y {
        if player.x > bomb.x && keys.is_held(ctl.left) {
            explosion::step_bomb(game, bomb_id, -1, true);
        } else if player.x < bomb.x && keys.is_held(ctl.right) {
            explosion::step_bomb(game, bomb_id, 1, true);
        }
    }
}

fn pickup_power_ups(game: &mut Game, index: usize) {
    for kind in PowerUpKind::ALL {
        let labels = game.board.power_ups.cells(kind).to_vec();
        for label in labels {
            let scene_id = format!("pu{label}");
            let Some(entity) = game.scene.get(&scene_id) else {
                continue;
            };
            let pickup_pos = Position::new(entity.x, entity.y);
            if !grid::collides(game.players[index].position(), pickup_pos, BLOCK_SIZE) {
                continue;
            }
            game.scene.remove(&scene_id);
            game.board.power_ups.cells_mut(kind).retain(|l| l != &label);
            let player = &mut game.players[index];
            match kind {
                PowerUpKind::Bombs => player.bombs += 1,
                PowerUpKind::Ranges => player.range += 1,
                PowerUpKind::Speed => player.speed += 1,
                PowerUpKind::BombSpeed => player.bomb_speed += 1,
            }
            debug!("[Player] {} picks up {:?} at {}", player.id, kind, label);
        }
    }
}
