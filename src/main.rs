//! Main entry point for the terminal demo.
//!
//! Initializes logging, parses command line options and hands control to
//! the interactive game loop. The simulation core under `game` is pure;
//! this binary is the only place that touches stdin/stdout.

use clap::Parser;

pub mod config;
mod game;
#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "icebomber", about = "Terminal demo of the grid bombing game core")]
struct Args {
    /// Number of players in the round (1 to 4).
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Emit each frame as a JSON render snapshot instead of drawing it.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    let args = Args::parse();
    game::demo::game_loop::run_game_loop(args.players, args.json)
}
