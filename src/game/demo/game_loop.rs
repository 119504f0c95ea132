//! Standalone game loop for local testing/demo.
//!
//! Drives a full round from the terminal. Player 1 is controlled from
//! stdin; each accepted input is held for a handful of ticks and then
//! released, so one line of input is roughly one move on the board.

use anyhow::Context;
use log::info;

use crate::game::assets::Assets;
use crate::game::demo::render;
use crate::game::input::{Controls, InputState};
use crate::game::state::Game;
use crate::game::types::PlayerId;

use std::io::{self, Write};

/// Ticks an input line is held before the keys release.
const INPUT_TICKS: u32 = 5;
/// Idle ticks after each input, letting timers catch up between prompts.
const IDLE_TICKS: u32 = 20;

enum Command {
    Keys(InputState),
    Pass,
    Quit,
}

/// Prompt for one input line and translate it to player 1's key codes.
fn get_player_input(ctl: Controls) -> anyhow::Result<Command> {
    print!("Move (← ↑ ↓ → / b = bomb / q = quit), then press Enter: ");
    io::stdout().flush().context("flushing prompt")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("reading input line")?;

    let mut keys = InputState::new();
    match input.trim() {
        "\x1b[D" => keys.press(ctl.left),
        "\x1b[C" => keys.press(ctl.right),
        "\x1b[A" => keys.press(ctl.up),
        "\x1b[B" => keys.press(ctl.down),
        "b" => keys.press(ctl.attack),
        "q" => return Ok(Command::Quit),
        _ => return Ok(Command::Pass),
    }
    Ok(Command::Keys(keys))
}

/// Run one round of the game in the terminal.
pub fn run_game_loop(num_players: usize, json: bool) -> anyhow::Result<()> {
    let mut game = Game::new(num_players, Assets::preloaded());
    game.start().context("starting round")?;
    let ctl = Controls::for_player(PlayerId::P1);

    println!("Game start!");
    print_frame(&game, json)?;

    let idle = InputState::new();
    loop {
        let keys = match get_player_input(ctl)? {
            Command::Keys(keys) => keys,
            Command::Pass => idle.clone(),
            Command::Quit => break,
        };

        for _ in 0..INPUT_TICKS {
            game.run(&keys);
        }
        for _ in 0..IDLE_TICKS {
            game.run(&idle);
        }

        print_frame(&game, json)?;

        if game.round_over {
            if let Some(winner) = game.players.iter().find(|p| !p.dead) {
                println!("{} wins the round! Score: {}", winner.id, winner.score);
            } else {
                println!("Nobody survived. Round over!");
            }
            break;
        }
    }

    info!("[Demo] game loop finished at t={} ms", game.clock);
    Ok(())
}

fn print_frame(game: &Game, json: bool) -> anyhow::Result<()> {
    if json {
        let frame = serde_json::to_string(&game.render_snapshot())
            .context("serializing frame")?;
        println!("{frame}");
    } else {
        render::print_scene(&game.scene);
        for player in &game.players {
            render::print_player_state(player);
        }
    }
    Ok(())
}
