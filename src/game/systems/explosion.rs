//! Bomb state machine: placement, arming, detonation, fragment
//! propagation, chained detonation, kick movement and despawning.
//!
//! Detonation walks each directional chain head-to-tail in the fixed
//! order left, right, up, down. Chained detonation is synchronous and
//! reentrant: a second bomb hit by a fragment finishes blowing before the
//! outer walk continues.

use log::debug;

use crate::config::game::{BLOCK_SIZE, BOMB_STEP_MS, GAME_SIZE, KICKABLE_POLL_MS};
use crate::game::entities::bomb::{Bomb, Fragment};
use crate::game::grid;
use crate::game::scene::{Entity, Shape};
use crate::game::scheduler::Event;
use crate::game::state::Game;
use crate::game::systems::rules;
use crate::game::types::{Direction, Position};
use crate::game::assets::ImageKey;

/// Outcome of evaluating one fragment cell during the cut pass.
enum CutEffect {
    /// Ice block: drop this fragment and everything farther out.
    Stop,
    /// Destructible block: this fragment still explodes, nothing beyond it.
    BlowAndStop,
    /// Open cell (or a player/bomb hit): arm and keep walking outward.
    Blow,
}

/// Try to register a bomb. Placement is rejected when a live bomb already
/// occupies the cell; the caller keeps its bomb count on rejection.
pub fn set_bomb(game: &mut Game, bomb: Bomb) -> bool {
    for id in &game.board.fired_bombs {
        if let Some(existing) = game.bombs.get(id) {
            if grid::collides(existing.position(), bomb.position(), BLOCK_SIZE) {
                debug!(
                    "[Bomb] placement rejected at ({}, {}): cell occupied by {}",
                    bomb.x, bomb.y, existing.id
                );
                return false;
            }
        }
    }

    let mut bomb = bomb;
    let id = bomb.id.clone();
    game.board.fired_bombs.push(id.clone());
    game.scene.add(Entity::new(
        id.clone(),
        bomb.x,
        bomb.y,
        BLOCK_SIZE,
        BLOCK_SIZE,
        Shape::Image { image: ImageKey::Bomb },
    ));
    let handle = game.scheduler.schedule_in(
        game.clock,
        bomb.timeout,
        id.clone(),
        Event::DetonateBomb { bomb_id: id.clone() },
    );
    bomb.arm_handle = Some(handle);
    debug!("[Bomb] {} armed for {} ms", id, bomb.timeout);
    game.bombs.insert(id, bomb);
    true
}

/// Detonate. A bomb that has already gone off stays gone: calling this
/// twice is a no-op.
pub fn blow(game: &mut Game, bomb_id: &str) {
    {
        let Some(bomb) = game.bombs.get_mut(bomb_id) else {
            return;
        };
        if bomb.blows {
            return;
        }
        bomb.blows = true;
        if let Some(handle) = bomb.arm_handle.take() {
            game.scheduler.cancel(handle);
        }
        bomb.moving = false;
        if let Some(handle) = bomb.move_handle.take() {
            game.scheduler.cancel(handle);
        }
        if let Some(entity) = game.scene.get_mut(bomb_id) {
            entity.shape = Shape::Image { image: ImageKey::BombExplosionCenter };
        }
    }
    debug!("[Bomb] {bomb_id} detonates");

    link_fragments(game, bomb_id);
    check_center_collision(game, bomb_id);

    if let Some(bomb) = game.bombs.get_mut(bomb_id) {
        let handle = game.scheduler.schedule_in(
            game.clock,
            bomb.blow_timeout,
            bomb_id,
            Event::DespawnBomb { bomb_id: bomb_id.to_string() },
        );
        bomb.blow_handle = Some(handle);
    }
}

/// Grow one fragment candidate per direction per distance step, dropping
/// candidates outside the playfield, then run the cut pass.
fn link_fragments(game: &mut Game, bomb_id: &str) {
    {
        let Some(bomb) = game.bombs.get_mut(bomb_id) else {
            return;
        };
        let (bx, by, range) = (bomb.x, bomb.y, bomb.range);
        for r in 1..=range {
            for direction in Direction::ALL {
                let offset = r * BLOCK_SIZE * direction.sign();
                let (mut x, mut y) = (bx, by);
                if direction.is_horizontal() {
                    x += offset;
                } else {
                    y += offset;
                }
                if x < 0 || x >= GAME_SIZE || y < 0 || y >= GAME_SIZE {
                    continue;
                }
                bomb.explosion
                    .chain_mut(direction)
                    .push(Fragment::new(x, y, direction.is_horizontal()));
            }
        }
    }
    cut_explosion_tails(game, bomb_id);
}

/// Walk each chain from the head outward, truncating at obstacles and
/// arming the surviving fragments.
fn cut_explosion_tails(game: &mut Game, bomb_id: &str) {
    for direction in Direction::ALL {
        let mut index = 0;
        loop {
            let Some(bomb) = game.bombs.get(bomb_id) else {
                return;
            };
            let Some(fragment) = bomb.explosion.chain(direction).get(index) else {
                break;
            };
            let (x, y) = (fragment.x, fragment.y);

            match colliding_effect(game, bomb_id, Position::new(x, y)) {
                CutEffect::Stop => {
                    if let Some(bomb) = game.bombs.get_mut(bomb_id) {
                        bomb.explosion.chain_mut(direction).truncate(index);
                    }
                    break;
                }
                CutEffect::BlowAndStop => {
                    if let Some(bomb) = game.bombs.get_mut(bomb_id) {
                        bomb.explosion.chain_mut(direction).truncate(index + 1);
                    }
                    arm_fragment(game, bomb_id, direction, index);
                    break;
                }
                CutEffect::Blow => {
                    arm_fragment(game, bomb_id, direction, index);
                    index += 1;
                }
            }
        }
    }
}

/// Evaluate what the explosion hits at one cell, applying side effects:
/// destroyed blocks, killed players, chained detonations.
fn colliding_effect(game: &mut Game, bomb_id: &str, point: Position) -> CutEffect {
    for label in &game.board.ice_blocks {
        if grid::collides(grid::to_coords(label), point, BLOCK_SIZE) {
            return CutEffect::Stop;
        }
    }

    let hit_block = game
        .board
        .blocks
        .iter()
        .find(|label| grid::collides(grid::to_coords(label), point, BLOCK_SIZE))
        .cloned();
    if let Some(label) = hit_block {
        debug!("[Bomb] {bomb_id} destroys block {label}");
        game.board.destroy_block(&label);
        game.scene.remove(&label);
        return CutEffect::BlowAndStop;
    }

    let hit_player = game
        .players
        .iter()
        .position(|p| !p.dead && grid::collides(p.position(), point, BLOCK_SIZE));
    if let Some(index) = hit_player {
        rules::player_dies(game, index);
        return CutEffect::Blow;
    }

    let hit_bomb = game
        .board
        .fired_bombs
        .iter()
        .find(|id| {
            id.as_str() != bomb_id
                && game
                    .bombs
                    .get(id.as_str())
                    .is_some_and(|b| !b.blows && grid::collides(b.position(), point, BLOCK_SIZE))
        })
        .cloned();
    if let Some(other_id) = hit_bomb {
        // chain reaction, resolved before the outer walk continues
        blow(game, &other_id);
        return CutEffect::Blow;
    }

    CutEffect::Blow
}

/// Insert the fragment's visual into the registry and start its own
/// despawn timer, independent of the parent bomb's.
fn arm_fragment(game: &mut Game, bomb_id: &str, direction: Direction, index: usize) {
    let Some(bomb) = game.bombs.get_mut(bomb_id) else {
        return;
    };
    let Some(fragment) = bomb.explosion.chain_mut(direction).get_mut(index) else {
        return;
    };
    fragment.armed = true;
    let image = if fragment.horizontal {
        ImageKey::BombExplosionHorizontal
    } else {
        ImageKey::BombExplosionVertical
    };
    let (x, y, timeout) = (fragment.x, fragment.y, fragment.timeout);
    let scene_id = fragment.scene_id();
    game.scene.add(Entity::new(
        scene_id,
        x,
        y,
        BLOCK_SIZE,
        BLOCK_SIZE,
        Shape::Image { image },
    ));
    game.scheduler.schedule_in(
        game.clock,
        timeout,
        bomb_id,
        Event::DespawnFragment {
            bomb_id: bomb_id.to_string(),
            direction,
            index,
        },
    );
}

/// Fragment despawn: flag it dead and drop its visual. Idempotent.
pub fn despawn_fragment(game: &mut Game, bomb_id: &str, direction: Direction, index: usize) {
    let Some(bomb) = game.bombs.get_mut(bomb_id) else {
        return;
    };
    let Some(fragment) = bomb.explosion.chain_mut(direction).get_mut(index) else {
        return;
    };
    if !fragment.alive {
        return;
    }
    fragment.alive = false;
    let scene_id = fragment.scene_id();
    game.scene.remove(&scene_id);
}

/// The detonation cell itself kills every player standing on it.
fn check_center_collision(game: &mut Game, bomb_id: &str) {
    let Some(bomb) = game.bombs.get(bomb_id) else {
        return;
    };
    let center = bomb.position();
    let hit: Vec<usize> = game
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.dead && grid::collides(p.position(), center, BLOCK_SIZE))
        .map(|(i, _)| i)
        .collect();
    for index in hit {
        rules::player_dies(game, index);
    }
}

/// True when `point` touches a detonated bomb's center cell or any
/// still-live fragment across its four chains.
pub fn explosion_collision_check(bomb: &Bomb, point: Position) -> bool {
    if !bomb.blows {
        return false;
    }
    if grid::collides(bomb.position(), point, BLOCK_SIZE) {
        return true;
    }
    bomb.explosion.chains().iter().any(|(_, chain)| {
        chain
            .iter()
            .any(|f| f.armed && f.alive && grid::collides(f.position(), point, BLOCK_SIZE))
    })
}

/// Remove a bomb entirely: cancel everything it owns (fragment timers
/// included), drop its visuals, and return the bomb slot to its owner.
/// Removing an already-removed bomb is a no-op.
pub fn remove_bomb(game: &mut Game, bomb_id: &str) {
    let Some(bomb) = game.bombs.remove(bomb_id) else {
        return;
    };
    game.scheduler.cancel_owner(bomb_id);
    game.scene.remove(bomb_id);
    for (_, chain) in bomb.explosion.chains() {
        for fragment in chain {
            if fragment.armed && fragment.alive {
                game.scene.remove(&fragment.scene_id());
            }
        }
    }
    game.board.fired_bombs.retain(|id| id != bomb_id);
    if let Some(player) = game.players.iter_mut().find(|p| p.id == bomb.owner) {
        player.bombs += 1;
    }
    debug!("[Bomb] {bomb_id} despawned");
}

/// One step of a kicked bomb. Stops at the first non-walkable cell,
/// otherwise advances and re-schedules itself.
pub fn step_bomb(game: &mut Game, bomb_id: &str, sign: i32, horizontal: bool) {
    let Some(bomb) = game.bombs.get_mut(bomb_id) else {
        return;
    };
    if bomb.blows {
        return;
    }
    let (mut x, mut y) = (bomb.x, bomb.y);
    if horizontal {
        x += sign * bomb.walk_speed;
    } else {
        y += sign * bomb.walk_speed;
    }
    if !game.board.is_walkable(x, y) {
        bomb.moving = false;
        bomb.move_handle = None;
        return;
    }
    bomb.moving = true;
    bomb.x = x;
    bomb.y = y;
    let handle = game.scheduler.schedule_in(
        game.clock,
        BOMB_STEP_MS,
        bomb_id,
        Event::StepBomb {
            bomb_id: bomb_id.to_string(),
            sign,
            horizontal,
        },
    );
    bomb.move_handle = Some(handle);
    if let Some(entity) = game.scene.get_mut(bomb_id) {
        entity.x = x;
        entity.y = y;
    }
}

/// Halt a kicked bomb and cancel its pending step.
pub fn stop_moving(game: &mut Game, bomb_id: &str) {
    let Some(bomb) = game.bombs.get_mut(bomb_id) else {
        return;
    };
    bomb.moving = false;
    if let Some(handle) = bomb.move_handle.take() {
        game.scheduler.cancel(handle);
    }
}

/// Poll until the owner has physically left the bomb's cell (or it has
/// already detonated), then make the bomb kickable.
pub fn set_bomb_wheels(game: &mut Game, player_index: usize, bomb_id: &str) {
    let Some(bomb) = game.bombs.get_mut(bomb_id) else {
        return;
    };
    let Some(player) = game.players.get(player_index) else {
        return;
    };
    let owner_on_cell = grid::collides(player.position(), bomb.position(), BLOCK_SIZE);
    if !owner_on_cell || bomb.blows {
        bomb.can_be_moved = true;
        return;
    }
    game.scheduler.schedule_in(
        game.clock,
        KICKABLE_POLL_MS,
        bomb_id,
        Event::KickablePoll {
            bomb_id: bomb_id.to_string(),
            player: player_index,
        },
    );
}
