//! Game orchestrator: owns the board, scene registry, scheduler, players
//! and live bombs, and drives one tick at a time.
//!
//! A tick reads the input snapshot, resolves each player's attack and
//! movement in the fixed order p1..p4, advances the logical clock by one
//! tick, then drains due scheduled events. The external renderer consumes
//! the scene registry between ticks and never mutates it.

use log::info;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::game::{BLOCK_SIZE, GAME_SIZE, TICK_MS};
use crate::game::assets::{Assets, ImageKey};
use crate::game::board::Board;
use crate::game::entities::bomb::Bomb;
use crate::game::entities::player::Player;
use crate::game::grid;
use crate::game::input::InputState;
use crate::game::scene::{Entity, Scene, Shape};
use crate::game::scheduler::{Event, Scheduler};
use crate::game::systems::{explosion, hud, movement};
use crate::game::types::{PlayerId, SourceRect};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("assets are not loaded yet")]
    AssetsNotReady,
}

/// Snapshot of everything the external renderer needs for one frame.
#[derive(Debug, Serialize)]
pub struct RenderSnapshot<'a> {
    pub scene: &'a Scene,
    pub huds: &'a [Scene],
}

pub struct Game {
    pub num_players: usize,
    pub board: Board,
    pub scene: Scene,
    pub scheduler: Scheduler,
    pub players: Vec<Player>,
    pub bombs: HashMap<String, Bomb>,
    pub huds: Vec<Scene>,
    pub assets: Assets,
    /// Logical time in milliseconds; advances one tick per `run`.
    pub clock: u64,
    pub round_over: bool,
}

impl Game {
    pub fn new(num_players: usize, assets: Assets) -> Self {
        Self {
            num_players: num_players.clamp(1, 4),
            board: Board::new(),
            scene: Scene::new(),
            scheduler: Scheduler::new(),
            players: Vec::new(),
            bombs: HashMap::new(),
            huds: Vec::new(),
            assets,
            clock: 0,
            round_over: false,
        }
    }

    /// Begin a round. Refused until the asset loader has signalled
    /// readiness; score and session codes survive from the previous round.
    pub fn start(&mut self) -> Result<(), GameError> {
        if !self.assets.is_ready() {
            return Err(GameError::AssetsNotReady);
        }
        self.scheduler.clear();
        self.bombs.clear();
        self.round_over = false;
        self.scene.clear();
        self.scene.add(Entity::new(
            "background",
            0,
            0,
            GAME_SIZE,
            GAME_SIZE,
            Shape::Image { image: ImageKey::Background },
        ));
        self.generate_players();
        self.board.generate_level(&mut rand::rng());
        self.draw_map();
        hud::initialize(self);
        info!(
            "[Game] round started: {} players, {} blocks",
            self.players.len(),
            self.board.blocks.len()
        );
        Ok(())
    }

    /// Advance one tick with the given input snapshot.
    pub fn run(&mut self, keys: &InputState) {
        if self.round_over {
            return;
        }
        for index in 0..self.players.len() {
            movement::run_player(self, index, keys);
            if self.round_over {
                return;
            }
        }
        self.clock += TICK_MS;
        for event in self.scheduler.take_due(self.clock) {
            self.dispatch(event);
            if self.round_over {
                break;
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::DetonateBomb { bomb_id } => explosion::blow(self, &bomb_id),
            Event::DespawnBomb { bomb_id } => explosion::remove_bomb(self, &bomb_id),
            Event::DespawnFragment { bomb_id, direction, index } => {
                explosion::despawn_fragment(self, &bomb_id, direction, index);
            }
            Event::StepBomb { bomb_id, sign, horizontal } => {
                explosion::step_bomb(self, &bomb_id, sign, horizontal);
            }
            Event::KickablePoll { bomb_id, player } => {
                explosion::set_bomb_wheels(self, player, &bomb_id);
            }
        }
    }

    /// Rebuild the roster at their spawn corners with default stats,
    /// carrying score and session code over from the previous round.
    fn generate_players(&mut self) {
        let previous: HashMap<PlayerId, (u32, String)> = self
            .players
            .iter()
            .map(|p| (p.id, (p.score, p.code.clone())))
            .collect();
        let mut rng = rand::rng();
        self.players = PlayerId::ALL
            .into_iter()
            .take(self.num_players)
            .map(|id| {
                let (score, code) = previous
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| (0, Player::generate_code(&mut rng)));
                let mut player = Player::new(id, grid::to_coords(id.spawn_label()), code);
                player.score = score;
                player
            })
            .collect();
    }

    fn draw_map(&mut self) {
        for index in 0..self.players.len() {
            self.sync_player_entity(index);
        }
        self.draw_cells("pu", ImageKey::PuBomb, self.board.power_ups.bombs.clone());
        self.draw_cells("pu", ImageKey::PuRange, self.board.power_ups.ranges.clone());
        self.draw_cells("pu", ImageKey::PuSpeed, self.board.power_ups.speed.clone());
        self.draw_cells("pu", ImageKey::PuWalkBombs, self.board.power_ups.bomb_speed.clone());
        self.draw_cells("", ImageKey::IceBlock, self.board.ice_blocks.clone());
        self.draw_cells("", ImageKey::Ice, self.board.blocks.clone());
    }

    fn draw_cells(&mut self, prefix: &str, image: ImageKey, labels: Vec<String>) {
        for label in labels {
            let pos = grid::to_coords(&label);
            self.scene.add(Entity::new(
                format!("{prefix}{label}"),
                pos.x,
                pos.y,
                BLOCK_SIZE,
                BLOCK_SIZE,
                Shape::Image { image },
            ));
        }
    }

    /// Mirror one player's position and sprite frame into the registry.
    /// Dead players keep their last position under a fixed defeat sprite.
    pub fn sync_player_entity(&mut self, index: usize) {
        let Some(player) = self.players.get(index) else {
            return;
        };
        let shape = if player.dead {
            Shape::Sprite {
                image: ImageKey::Skull,
                source: SourceRect { x: 0, y: 0, width: 136, height: 156 },
            }
        } else {
            Shape::Sprite {
                image: ImageKey::Players,
                source: player.source,
            }
        };
        let id = player.id.as_str().to_string();
        let (x, y) = (player.x, player.y);
        if let Some(entity) = self.scene.get_mut(&id) {
            entity.x = x;
            entity.y = y;
            entity.shape = shape;
        } else {
            self.scene.add(Entity::new(id, x, y, BLOCK_SIZE, BLOCK_SIZE, shape));
        }
    }

    pub fn players_alive(&self) -> usize {
        self.players.iter().filter(|p| !p.dead).count()
    }

    /// Everything the renderer consumes this frame.
    pub fn render_snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            scene: &self.scene,
            huds: &self.huds,
        }
    }
}
