pub mod explosion;
pub mod hud;
pub mod movement;
pub mod rules;
