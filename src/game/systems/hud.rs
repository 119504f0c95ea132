//! Per-player HUD sub-scenes: portrait, score, stat counters and power-up
//! icon visibility. The core recomputes these on every stat change; layout
//! and styling beyond positions is the renderer's business.

use crate::config::game::{HUD_PANEL_HEIGHT, HUD_PANEL_WIDTH};
use crate::game::assets::ImageKey;
use crate::game::scene::{Entity, Scene, Shape};
use crate::game::state::Game;
use crate::game::types::SourceRect;

const STAT_ICONS: [(&str, ImageKey); 4] = [
    ("Bomb", ImageKey::PuBomb),
    ("Speed", ImageKey::PuSpeed),
    ("Range", ImageKey::PuRange),
    ("WalkBombs", ImageKey::PuWalkBombs),
];

const STAT_TEXTS: [&str; 4] = ["bombs", "speed", "range", "bombSpeed"];

/// Rebuild every player's HUD panel for a fresh round.
pub fn initialize(game: &mut Game) {
    game.huds = (0..game.players.len()).map(|_| Scene::new()).collect();
    for index in 0..game.players.len() {
        build_panel(game, index);
        draw_player_resources(game, index);
    }
}

fn build_panel(game: &mut Game, index: usize) {
    let player = game.players[index].clone();
    let pid = player.id.as_str();
    let quarter = HUD_PANEL_HEIGHT / 4 - 2;
    let icon = quarter - 4;
    let y = 2;

    let Some(hud) = game.huds.get_mut(index) else {
        return;
    };
    hud.clear();
    hud.add(Entity::new(
        "background",
        0,
        0,
        HUD_PANEL_WIDTH,
        HUD_PANEL_HEIGHT,
        Shape::Rect { color: "#89a8c3".into() },
    ));
    hud.add(Entity::new(
        "plus",
        45,
        105,
        20,
        20,
        Shape::Text {
            text: "+".into(),
            font: "100px Arial".into(),
            style: "#cad4dc".into(),
        },
    ));
    hud.add(Entity::new(
        pid,
        0,
        y,
        icon,
        icon,
        Shape::Sprite {
            image: ImageKey::Players,
            source: player.original_source,
        },
    ));
    for (slot, (suffix, image)) in STAT_ICONS.into_iter().enumerate() {
        hud.add(Entity::new(
            format!("{pid}{suffix}"),
            quarter * (slot as i32 + 1),
            y,
            icon,
            icon,
            Shape::Image { image },
        ));
    }
    for (slot, suffix) in STAT_TEXTS.into_iter().enumerate() {
        hud.add(Entity::new(
            format!("{pid}{suffix}"),
            quarter * (slot as i32 + 1) + 16,
            y + 13,
            20,
            20,
            Shape::Text {
                text: String::new(),
                font: "16px Impact".into(),
                style: "black".into(),
            },
        ));
    }
    hud.add(Entity::new(
        format!("{pid}score"),
        quarter - 14,
        y + 13,
        20,
        20,
        Shape::Text {
            text: String::new(),
            font: "16px Impact".into(),
            style: "white".into(),
        },
    ));
    hud.add(Entity::new(
        format!("{pid}code"),
        50,
        120,
        20,
        20,
        Shape::Text {
            text: player.code.clone(),
            font: "16px Impact".into(),
            style: "black".into(),
        },
    ));
}

/// Refresh one player's counters and icon visibility from their stats.
/// Counters only show once a stat rises above its baseline.
pub fn draw_player_resources(game: &mut Game, index: usize) {
    let Some(player) = game.players.get(index) else {
        return;
    };
    let pid = player.id.as_str();
    let score = player.score;
    let (bombs, range, speed, bomb_speed) =
        (player.bombs, player.range, player.speed, player.bomb_speed);
    let Some(hud) = game.huds.get_mut(index) else {
        return;
    };

    set_text(hud, &format!("{pid}score"), counter(score as i32, 0));
    set_text(hud, &format!("{pid}bombs"), counter(bombs, 1));
    set_text(hud, &format!("{pid}range"), counter(range, 1));
    set_text(hud, &format!("{pid}speed"), counter(speed, 1));
    set_text(hud, &format!("{pid}bombSpeed"), counter(bomb_speed, 1));
    set_hidden(hud, &format!("{pid}Bomb"), bombs < 1);
    set_hidden(hud, &format!("{pid}Range"), range < 1);
    set_hidden(hud, &format!("{pid}Speed"), speed < 1);
    set_hidden(hud, &format!("{pid}WalkBombs"), bomb_speed < 1);
}

/// Swap the panel to its defeated layout: skull portrait, stat row gone.
pub fn draw_defeated(game: &mut Game, index: usize) {
    let Some(player) = game.players.get(index) else {
        return;
    };
    let pid = player.id.as_str().to_string();
    let Some(hud) = game.huds.get_mut(index) else {
        return;
    };
    for (suffix, _) in STAT_ICONS {
        hud.remove(&format!("{pid}{suffix}"));
    }
    for suffix in STAT_TEXTS {
        hud.remove(&format!("{pid}{suffix}"));
    }
    if let Some(portrait) = hud.get_mut(&pid) {
        portrait.shape = Shape::Sprite {
            image: ImageKey::Skull,
            source: SourceRect { x: 12, y: 0, width: 136, height: 156 },
        };
    }
}

fn counter(value: i32, baseline: i32) -> String {
    if value > baseline {
        value.to_string()
    } else {
        String::new()
    }
}

fn set_text(hud: &mut Scene, id: &str, value: String) {
    if let Some(entity) = hud.get_mut(id) {
        if let Shape::Text { text, .. } = &mut entity.shape {
            *text = value;
        }
    }
}

fn set_hidden(hud: &mut Scene, id: &str, hidden: bool) {
    if let Some(entity) = hud.get_mut(id) {
        entity.hidden = hidden;
    }
}
