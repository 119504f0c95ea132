// Core game module. Pure simulation: no IO, no wall clock, no rendering.
pub mod assets;
pub mod board;
pub mod demo;
pub mod entities;
pub mod grid;
pub mod input;
pub mod scene;
pub mod scheduler;
pub mod state;
pub mod systems;
pub mod types;
