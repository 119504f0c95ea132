//! Scenario tests driving the whole core through `Game::run`, the same
//! entry point an embedding uses. Unit tests for individual modules live
//! next to them; these cover the timed flows: detonation, propagation,
//! chain reactions, kicking, pickups and the win condition.

use crate::config::game::{
    BLOCK_SIZE, BOMB_TIMEOUT_MS, BLOW_TIMEOUT_MS, FRAGMENT_TIMEOUT_MS, GAME_SIZE, TICK_MS,
};
use crate::game::assets::Assets;
use crate::game::entities::bomb::Bomb;
use crate::game::input::InputState;
use crate::game::state::{Game, GameError};
use crate::game::systems::{explosion, rules};
use crate::game::types::{Direction, PlayerId, Position, PowerUpKind};
use crate::game::scene::{Entity, Shape};
use crate::game::assets::ImageKey;

/// A started round with every random obstacle stripped off, so scenarios
/// place their own blocks and power-ups deterministically.
fn empty_game(num_players: usize) -> Game {
    let mut game = Game::new(num_players, Assets::preloaded());
    game.start().unwrap();
    for label in game.board.blocks.clone() {
        game.scene.remove(&label);
    }
    for label in game.board.ice_blocks.clone() {
        game.scene.remove(&label);
    }
    for kind in PowerUpKind::ALL {
        for label in game.board.power_ups.cells(kind).to_vec() {
            game.scene.remove(&format!("pu{label}"));
        }
        game.board.power_ups.cells_mut(kind).clear();
    }
    game.board.blocks.clear();
    game.board.ice_blocks.clear();
    game
}

/// Run idle ticks until `ms` of logical time has passed.
fn tick_for(game: &mut Game, ms: u64) {
    let idle = InputState::new();
    for _ in 0..(ms / TICK_MS) {
        game.run(&idle);
    }
}

/// Plant a bomb directly, bypassing a player's attack key.
fn plant(game: &mut Game, owner: PlayerId, x: i32, y: i32, range: i32) -> String {
    let bomb = Bomb::new(owner, x, y, range, BOMB_TIMEOUT_MS);
    let id = bomb.id.clone();
    assert!(explosion::set_bomb(game, bomb), "placement refused");
    id
}

fn block_entity(label: &str, pos: Position) -> Entity {
    Entity::new(
        label,
        pos.x,
        pos.y,
        BLOCK_SIZE,
        BLOCK_SIZE,
        Shape::Image { image: ImageKey::Ice },
    )
}

#[test]
fn start_refuses_until_assets_are_ready() {
    let mut game = Game::new(2, Assets::new());
    assert!(matches!(game.start(), Err(GameError::AssetsNotReady)));
    game.assets = Assets::preloaded();
    assert!(game.start().is_ok());
}

#[test]
fn player_count_is_clamped() {
    let mut game = Game::new(9, Assets::preloaded());
    game.start().unwrap();
    assert_eq!(game.players.len(), 4);

    let mut game = Game::new(0, Assets::preloaded());
    game.start().unwrap();
    assert_eq!(game.players.len(), 1);
}

#[test]
fn restart_preserves_score_and_code_but_resets_stats() {
    let mut game = Game::new(2, Assets::preloaded());
    game.start().unwrap();
    game.players[0].score = 3;
    game.players[0].bombs = 5;
    let code = game.players[0].code.clone();

    game.start().unwrap();
    assert_eq!(game.players[0].score, 3);
    assert_eq!(game.players[0].code, code);
    assert_eq!(game.players[0].bombs, 1);
    assert_eq!(game.players[0].position(), Position::new(0, 0));
}

#[test]
fn open_detonation_arms_the_full_cross() {
    let mut game = empty_game(1);
    let id = plant(&mut game, PlayerId::P1, 120, 180, 2);

    tick_for(&mut game, BOMB_TIMEOUT_MS - TICK_MS);
    assert!(!game.bombs[&id].blows);
    tick_for(&mut game, TICK_MS);

    let bomb = &game.bombs[&id];
    assert!(bomb.blows);
    for (direction, chain) in bomb.explosion.chains() {
        assert_eq!(chain.len(), 2, "{direction:?} chain");
        assert!(chain.iter().all(|f| f.armed && f.alive));
    }
    assert_eq!(
        game.scene.get(&id).unwrap().shape,
        Shape::Image { image: ImageKey::BombExplosionCenter }
    );
    // fragment visuals are live too, e.g. two cells right of the center
    assert!(game.scene.contains("bombFragE4"));
}

#[test]
fn despawn_clears_visuals_and_returns_the_bomb_slot() {
    let mut game = empty_game(1);
    let owner_bombs = game.players[0].bombs;
    let id = plant(&mut game, PlayerId::P1, 120, 180, 1);

    tick_for(&mut game, BOMB_TIMEOUT_MS + BLOW_TIMEOUT_MS);
    assert!(!game.bombs.contains_key(&id));
    assert!(!game.scene.contains(&id));
    assert!(!game.scene.contains("bombFragD4"));
    assert!(game.board.fired_bombs.is_empty());
    assert_eq!(game.players[0].bombs, owner_bombs + 1);
    assert_eq!(game.scheduler.pending_for(&id), 0);
}

#[test]
fn a_block_is_destroyed_and_truncates_the_chain() {
    let mut game = empty_game(1);
    // E4 sits two cells right of the bomb
    let pos = crate::game::grid::to_coords("E4");
    game.board.blocks.push("E4".into());
    game.scene.add(block_entity("E4", pos));

    let id = plant(&mut game, PlayerId::P1, 120, 180, 3);
    tick_for(&mut game, BOMB_TIMEOUT_MS);

    assert!(game.board.blocks.is_empty());
    assert!(!game.scene.contains("E4"));
    let right = &game.bombs[&id].explosion.right;
    assert_eq!(right.len(), 2);
    // the fragment on the block's cell still explodes
    assert!(right[1].armed);
}

#[test]
fn an_ice_block_truncates_without_arming() {
    let mut game = empty_game(1);
    game.board.ice_blocks.push("D4".into());

    let id = plant(&mut game, PlayerId::P1, 120, 180, 2);
    tick_for(&mut game, BOMB_TIMEOUT_MS);

    let bomb = &game.bombs[&id];
    assert!(bomb.explosion.right.is_empty());
    assert!(!game.scene.contains("bombFragD4"));
    // the other directions still propagate
    assert_eq!(bomb.explosion.left.len(), 2);
    assert!(game.board.ice_blocks.contains(&"D4".to_string()));
}

#[test]
fn fragments_chain_detonate_a_neighboring_bomb() {
    let mut game = empty_game(1);
    let first = plant(&mut game, PlayerId::P1, 120, 180, 2);
    tick_for(&mut game, 1000);
    let second = plant(&mut game, PlayerId::P1, 180, 180, 1);

    // the first bomb's timer fires; the second goes up with it
    tick_for(&mut game, BOMB_TIMEOUT_MS - 1000);
    assert!(game.bombs[&first].blows);
    assert!(game.bombs[&second].blows);

    // the second bomb's own timer later finds it already detonated
    tick_for(&mut game, 1000);
    assert!(!game.bombs.contains_key(&first));
}

#[test]
fn detonating_twice_is_a_noop() {
    let mut game = empty_game(1);
    let id = plant(&mut game, PlayerId::P1, 120, 180, 2);

    explosion::blow(&mut game, &id);
    let chain_len = game.bombs[&id].explosion.right.len();
    let pending = game.scheduler.pending_for(&id);
    explosion::blow(&mut game, &id);
    assert_eq!(game.bombs[&id].explosion.right.len(), chain_len);
    assert_eq!(game.scheduler.pending_for(&id), pending);
}

#[test]
fn placement_on_an_occupied_cell_is_rejected() {
    let mut game = empty_game(1);
    plant(&mut game, PlayerId::P1, 120, 180, 1);
    let duplicate = Bomb::new(PlayerId::P1, 125, 185, 1, BOMB_TIMEOUT_MS);
    assert!(!explosion::set_bomb(&mut game, duplicate));
    assert_eq!(game.board.fired_bombs.len(), 1);
}

#[test]
fn despawned_fragments_no_longer_hit() {
    let mut game = empty_game(1);
    let id = plant(&mut game, PlayerId::P1, 120, 180, 1);
    explosion::blow(&mut game, &id);

    let fragment_cell = Position::new(180, 180);
    assert!(explosion::explosion_collision_check(&game.bombs[&id], fragment_cell));
    explosion::despawn_fragment(&mut game, &id, Direction::Right, 0);
    assert!(!explosion::explosion_collision_check(&game.bombs[&id], fragment_cell));
    // the center cell still burns
    assert!(explosion::explosion_collision_check(&game.bombs[&id], Position::new(120, 180)));
}

#[test]
fn the_center_kills_every_player_standing_on_it() {
    let mut game = empty_game(2);
    // p2 spawns at M13; put the bomb under them
    let spawn = crate::game::grid::to_coords("M13");
    let id = plant(&mut game, PlayerId::P1, spawn.x, spawn.y, 1);
    explosion::blow(&mut game, &id);

    assert!(game.players[1].dead);
    assert!(game.round_over);
    assert_eq!(game.players[0].score, 1);
}

#[test]
fn last_player_standing_wins_once() {
    let mut game = empty_game(2);
    rules::player_dies(&mut game, 0);

    assert!(game.round_over);
    assert_eq!(game.players[1].score, 1);
    assert!(game.scheduler.is_empty());

    // idempotent: no second credit, and a finished round no longer ticks
    rules::player_dies(&mut game, 0);
    assert_eq!(game.players[1].score, 1);
    let clock = game.clock;
    game.run(&InputState::new());
    assert_eq!(game.clock, clock);
}

#[test]
fn walking_into_a_power_up_collects_it() {
    let mut game = empty_game(1);
    let pos = crate::game::grid::to_coords("B1");
    game.board.power_ups.speed.push("B1".into());
    game.scene.add(Entity::new(
        "puB1",
        pos.x,
        pos.y,
        BLOCK_SIZE,
        BLOCK_SIZE,
        Shape::Image { image: ImageKey::PuSpeed },
    ));

    let mut keys = InputState::new();
    keys.press(game.players[0].controls().right);
    game.run(&keys);

    assert_eq!(game.players[0].speed, 2);
    assert!(!game.scene.contains("puB1"));
    assert!(game.board.power_ups.speed.is_empty());
}

#[test]
fn a_bomb_becomes_kickable_once_its_owner_leaves_the_cell() {
    let mut game = empty_game(1);
    let mut keys = InputState::new();
    keys.press(game.players[0].controls().attack);
    game.run(&keys);

    let id = game.board.fired_bombs[0].clone();
    assert!(!game.bombs[&id].can_be_moved);

    // still standing on it after the first poll
    tick_for(&mut game, 300);
    assert!(!game.bombs[&id].can_be_moved);

    let mut right = InputState::new();
    right.press(game.players[0].controls().right);
    for _ in 0..20 {
        game.run(&right);
    }
    tick_for(&mut game, 500);
    assert!(game.bombs[&id].can_be_moved);
}

#[test]
fn a_kicked_bomb_slides_until_it_hits_the_wall() {
    let mut game = empty_game(1);
    game.players[0].bomb_speed = 1;
    let id = plant(&mut game, PlayerId::P1, 60, 0, 1);
    game.bombs.get_mut(&id).unwrap().can_be_moved = true;

    let mut right = InputState::new();
    right.press(game.players[0].controls().right);
    game.run(&right);

    // the player stays put against the solid bomb
    assert_eq!(game.players[0].x, 0);
    assert!(game.bombs[&id].moving);

    tick_for(&mut game, 2500);
    let bomb = &game.bombs[&id];
    assert_eq!(bomb.x, GAME_SIZE - BLOCK_SIZE);
    assert!(!bomb.moving);
    assert_eq!(game.scene.get(&id).unwrap().x, GAME_SIZE - BLOCK_SIZE);
}

#[test]
fn walking_into_live_fragments_is_fatal() {
    let mut game = empty_game(2);
    let id = plant(&mut game, PlayerId::P2, 120, 0, 1);
    explosion::blow(&mut game, &id);

    // p1 walks right from (0, 0) into the fragment at (60, 0)
    let mut right = InputState::new();
    right.press(game.players[0].controls().right);
    game.run(&right);

    assert!(game.players[0].dead);
    assert!(game.round_over);
    assert_eq!(game.players[1].score, 1);
}

#[test]
fn fragments_expire_after_their_timeout() {
    let mut game = empty_game(1);
    plant(&mut game, PlayerId::P1, 120, 180, 1);
    tick_for(&mut game, BOMB_TIMEOUT_MS);
    assert!(game.scene.contains("bombFragD4"));

    tick_for(&mut game, FRAGMENT_TIMEOUT_MS);
    assert!(!game.scene.contains("bombFragD4"));
}
