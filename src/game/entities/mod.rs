pub mod bomb;
pub mod player;
