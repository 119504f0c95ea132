//! Round rules: death and win-condition detection.

use log::info;

use crate::game::state::Game;
use crate::game::systems::hud;

/// Kill a player: freeze them with the defeat sprite and check the win
/// condition. Killing an already-dead player is a no-op, which also keeps
/// the round win from being credited twice.
pub fn player_dies(game: &mut Game, index: usize) {
    {
        let Some(player) = game.players.get_mut(index) else {
            return;
        };
        if player.dead {
            return;
        }
        player.dead = true;
        player.current_frame = 1;
        info!("[Game] {} is defeated", player.id);
    }
    game.sync_player_entity(index);
    hud::draw_defeated(game, index);

    let alive: Vec<usize> = game
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.dead)
        .map(|(i, _)| i)
        .collect();
    if alive.len() < 2 {
        if let Some(&winner) = alive.first() {
            game.players[winner].score += 1;
            info!("[Game] {} wins the round", game.players[winner].id);
            hud::draw_player_resources(game, winner);
        }
        // Stop the round cleanly: nothing scheduled may fire afterwards.
        game.scheduler.clear();
        game.round_over = true;
    }
}
