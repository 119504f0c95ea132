// Demo module for the game. Provides submodules for running the terminal
// game loop and rendering scene snapshots as text.
pub mod game_loop;
pub mod render;
