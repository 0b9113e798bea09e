//! HUD text and menu layout
//!
//! Pure data: the renderer decides fonts and colors.

use glam::Vec2;

use crate::consts::ELEMENT_EDGE_OFFSET;
use crate::round_to_ten;
use crate::sim::geom::Rect;
use crate::sim::state::GameStats;
use crate::{Difficulty, Settings};

/// Base button footprint before scaling
pub const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);

/// Format with thousands separators ("12,340")
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Scoreboard contents derived from the current stats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: String,
    pub high_score: String,
    pub level: String,
    /// Reserve ship icons drawn top-left
    pub ships: u32,
}

impl Scoreboard {
    pub fn from_stats(stats: &GameStats) -> Self {
        Self {
            score: format!("Score: {}", group_thousands(round_to_ten(stats.score))),
            high_score: format!(
                "High Score: {}",
                group_thousands(round_to_ten(stats.high_score))
            ),
            level: format!("Level: {}", stats.level),
            ships: stats.ships_left,
        }
    }

    /// Rects of the reserve ship icons, left to right
    pub fn ship_icons(&self, settings: &Settings) -> Vec<Rect> {
        (0..self.ships)
            .map(|i| {
                Rect::new(
                    ELEMENT_EDGE_OFFSET + i as f32 * settings.ship_width,
                    ELEMENT_EDGE_OFFSET,
                    settings.ship_width,
                    settings.ship_height,
                )
            })
            .collect()
    }
}

/// What a menu button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start(Difficulty),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuButton {
    pub label: &'static str,
    pub rect: Rect,
    pub action: MenuAction,
}

/// Difficulty and quit buttons around the screen center
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub buttons: Vec<MenuButton>,
}

impl MenuLayout {
    pub fn for_settings(settings: &Settings) -> Self {
        let size = BUTTON_SIZE * settings.scale_factor;
        let center = Vec2::new(settings.screen_width, settings.screen_height) / 2.0;

        // Offsets are in button sizes from a centered button
        let button = |label, dx: f32, dy: f32, action| MenuButton {
            label,
            rect: Rect::from_center(center + Vec2::new(dx, dy) * size, size),
            action,
        };

        Self {
            buttons: vec![
                button("Easy", -1.0, 0.0, MenuAction::Start(Difficulty::Easy)),
                button("Normal", 0.0, 0.0, MenuAction::Start(Difficulty::Normal)),
                button("Hard", 1.0, 0.0, MenuAction::Start(Difficulty::Hard)),
                button("Quit", 0.0, 1.0, MenuAction::Quit),
            ],
        }
    }

    pub fn hit_test(&self, point: Vec2) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.action)
    }
}
