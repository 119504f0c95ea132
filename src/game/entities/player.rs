//! Player entity: stats, sprite animation state, and round-to-round
//! identity (score and session code).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::game::{
    BLOCK_SIZE, BOMB_TIMEOUT_MS, DEFAULT_BOMBS, DEFAULT_BOMB_SPEED, DEFAULT_LIVES, DEFAULT_RANGE,
    DEFAULT_SPEED, PLAYER_CODE_LEN, PLAYER_FRAMES,
};
use crate::game::input::{Controls, InputState};
use crate::game::types::{PlayerId, Position, SourceRect};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub lives: i32,
    pub speed: i32,
    pub range: i32,
    pub bombs: i32,
    pub bomb_speed: i32,
    pub bomb_timeout: u64,
    pub dead: bool,
    pub score: u32,
    pub code: String,
    pub frames: u32,
    pub current_frame: u32,
    pub source: SourceRect,
    pub original_source: SourceRect,
}

impl Player {
    pub fn new(id: PlayerId, pos: Position, code: String) -> Self {
        let source = SourceRect {
            x: id.sheet_offset(),
            y: 0,
            width: 32,
            height: 32,
        };
        Self {
            id,
            x: pos.x,
            y: pos.y,
            width: BLOCK_SIZE,
            height: BLOCK_SIZE,
            lives: DEFAULT_LIVES,
            speed: DEFAULT_SPEED,
            range: DEFAULT_RANGE,
            bombs: DEFAULT_BOMBS,
            bomb_speed: DEFAULT_BOMB_SPEED,
            bomb_timeout: BOMB_TIMEOUT_MS,
            dead: false,
            score: 0,
            code,
            frames: PLAYER_FRAMES,
            current_frame: 1,
            source,
            original_source: source,
        }
    }

    pub fn controls(&self) -> Controls {
        Controls::for_player(self.id)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Advance the walk cycle: pick the sheet row from the held direction,
    /// then step the frame column, wrapping after the last frame.
    pub fn animate(&mut self, keys: &InputState) {
        let ctl = self.controls();
        if keys.is_held(ctl.down) {
            self.source.y = 0;
        }
        if keys.is_held(ctl.left) {
            self.source.y = 32;
        }
        if keys.is_held(ctl.right) {
            self.source.y = 64;
        }
        if keys.is_held(ctl.up) {
            self.source.y = 96;
        }

        if self.frames == self.current_frame {
            self.current_frame = 1;
            self.source.x = self.original_source.x;
        } else {
            self.source.x += self.source.width;
        }
        self.current_frame += 1;
    }

    /// Short random session code shown on the player's HUD panel.
    pub fn generate_code(rng: &mut impl Rng) -> String {
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        (0..PLAYER_CODE_LEN)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn animation_wraps_after_the_last_frame() {
        let mut player = Player::new(PlayerId::P1, Position::new(0, 0), "abcd".into());
        let mut keys = InputState::new();
        keys.press(player.controls().right);

        player.animate(&keys);
        assert_eq!(player.source.y, 64);
        assert_eq!(player.source.x, 32);
        player.animate(&keys);
        assert_eq!(player.source.x, 64);
        player.animate(&keys);
        // third frame wraps back to the sheet origin
        assert_eq!(player.source.x, player.original_source.x);
    }

    #[test]
    fn generated_codes_have_the_expected_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = Player::generate_code(&mut rng);
        assert_eq!(code.len(), PLAYER_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
