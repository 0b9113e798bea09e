//! Alien Invasion - a fixed-tick arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, fleet, projectiles, collisions, session loop)
//! - `renderer`: Render surface seam and a vertex-batching implementation
//! - `platform`: Input events and frame timing
//! - `persistence`: JSON file helpers shared by settings and high scores
//! - `demo`: Attract-mode pilot
//! - `ui`: Scoreboard text and menu buttons
//! - `settings`, `highscores`: Tunables and the persisted high score

pub mod audio;
pub mod demo;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScoreFile;
pub use settings::{Difficulty, Settings};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use super::Duration;

    /// Target simulation rate; every speed in `Settings` is distance per tick
    pub const TICK_RATE: u32 = 60;

    /// Multiplier for gaps between displayed elements
    pub const ELEMENT_SPACING: f32 = 2.0;
    /// Additive gap between HUD elements
    pub const ELEMENT_EDGE_OFFSET: f32 = 10.0;
    /// Additive gap between elements and the screen edge
    pub const SCREEN_EDGE_OFFSET: f32 = 20.0;
    /// Scoreboard height, in alien heights, kept clear above the top row
    pub const SCOREBOARD_CLEARANCE: f32 = 2.5;

    /// Explosion lifetime (125 ms)
    pub const EXPLOSION_TICKS: u32 = 8;
    /// Alien animation panel duration (500 ms)
    pub const ALIEN_FRAME_TICKS: u32 = 30;
    /// Title prompt blink period (500 ms)
    pub const BLINK_TICKS: u32 = 30;
    /// Idle time on the title screen before the demo starts (1 s)
    pub const DEMO_DELAY_TICKS: u32 = 60;

    pub const LIFE_LOST_PAUSE: Duration = Duration::from_millis(2000);
    pub const GAME_OVER_PAUSE: Duration = Duration::from_millis(500);
    pub const GAME_START_PAUSE: Duration = Duration::from_millis(500);
}

/// Round to the nearest ten (display and persistence convention)
///
/// Ties go to the even ten: 125 becomes 120, 135 becomes 140.
#[inline]
pub fn round_to_ten(value: u64) -> u64 {
    let tens = value / 10;
    let rest = value % 10;
    let up = rest > 5 || (rest == 5 && tens % 2 == 1);
    (tens + up as u64).saturating_mul(10)
}
