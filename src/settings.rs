//! Game settings and tunables
//!
//! Static settings are fixed for a session; the dynamic subset (speeds,
//! alien projectile cap, fleet direction, point value) is reset at each
//! new game and escalates as levels are cleared.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Difficulty presets, selectable before a game or after game over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "normal" | "n" => Some(Difficulty::Normal),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to the alien projectile cap
    pub fn multiplier(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Game settings (process-wide, mutated in place by the simulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Display scale relative to the 1280-wide reference layout
    pub scale_factor: f32,

    // === Footprints ===
    pub ship_width: f32,
    pub ship_height: f32,
    pub alien_width: f32,
    pub alien_height: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,

    // === Static gameplay ===
    /// Ships in reserve at the start of a game
    pub ship_limit: u32,
    /// Concurrent ship projectiles
    pub ship_bullets_allowed: usize,
    /// Distance the fleet descends at each reversal
    pub fleet_drop_speed: f32,
    /// Speed multiplier applied per cleared level
    pub speedup_scale: f32,
    /// Point value multiplier applied per cleared level
    pub score_scale: f32,
    /// Level-ups after which speeds stop increasing
    pub max_speedups: u32,

    // === Dynamic (reset each game) ===
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    /// Concurrent alien projectiles (base cap times difficulty)
    pub alien_bullets_allowed: usize,
    /// 1.0 moves the fleet right, -1.0 left
    pub fleet_direction: f32,
    pub alien_points: u64,
    /// Speed escalations applied so far
    pub speedups: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            scale_factor: 1.0,

            ship_width: 60.0,
            ship_height: 48.0,
            alien_width: 60.0,
            alien_height: 40.0,
            bullet_width: 3.0,
            bullet_height: 15.0,

            ship_limit: 3,
            ship_bullets_allowed: 3,
            fleet_drop_speed: 10.0,
            speedup_scale: 1.1,
            score_scale: 1.5,
            max_speedups: 10,

            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_bullets_allowed: 0,
            fleet_direction: 1.0,
            alien_points: 0,
            speedups: 0,
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    /// Base ship speed before any scaling
    const BASE_SHIP_SPEED: f32 = 1.5;
    const BASE_BULLET_SPEED: f32 = 3.0;
    const BASE_ALIEN_SPEED: f32 = 1.0;
    const BASE_ALIEN_BULLETS: usize = 1;
    const BASE_ALIEN_POINTS: u64 = 50;

    /// Reset the settings that change throughout a game
    pub fn initialize_dynamic_settings(&mut self) {
        let scale = self.scale_factor;
        self.ship_speed = Self::BASE_SHIP_SPEED * scale;
        self.bullet_speed = Self::BASE_BULLET_SPEED * scale;
        self.alien_speed = Self::BASE_ALIEN_SPEED * scale;
        self.alien_bullets_allowed = Self::BASE_ALIEN_BULLETS;
        self.fleet_direction = 1.0;
        self.alien_points = Self::BASE_ALIEN_POINTS;
        self.speedups = 0;
    }

    /// Uniformly scale every distance quantity (screen, footprints, speeds, drop)
    ///
    /// Used once at startup to match a display larger or smaller than the
    /// 1280-wide reference layout.
    pub fn scale(&mut self, factor: f32) {
        if factor <= 0.0 || !factor.is_finite() {
            log::warn!("Ignoring invalid scale factor {factor}");
            return;
        }
        self.scale_factor *= factor;
        self.screen_width *= factor;
        self.screen_height *= factor;
        self.ship_width *= factor;
        self.ship_height *= factor;
        self.alien_width *= factor;
        self.alien_height *= factor;
        self.bullet_width *= factor;
        self.bullet_height *= factor;
        self.fleet_drop_speed *= factor;
        self.ship_speed *= factor;
        self.bullet_speed *= factor;
        self.alien_speed *= factor;
    }

    /// Escalate speeds and point value after a cleared level
    ///
    /// Speeds stop growing after `max_speedups` escalations; point values
    /// keep scaling.
    pub fn increase_speed(&mut self) {
        if self.speedups < self.max_speedups {
            self.ship_speed *= self.speedup_scale;
            self.bullet_speed *= self.speedup_scale;
            self.alien_speed *= self.speedup_scale;
            self.speedups += 1;
        }
        self.alien_points = (self.alien_points as f32 * self.score_scale) as u64;
    }

    /// Apply the difficulty multiplier to the alien projectile cap
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.alien_bullets_allowed *= difficulty.multiplier() as usize;
    }

    /// Smallest accepted screen or sprite dimension
    const MIN_FOOTPRINT: f32 = 1.0;

    /// Check that every screen and sprite dimension is usable
    pub fn validate(&self) -> Result<(), String> {
        let dimensions = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() || value < Self::MIN_FOOTPRINT {
                return Err(format!("{name} = {value} is below {}", Self::MIN_FOOTPRINT));
            }
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(format!("scale_factor = {} must be positive", self.scale_factor));
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Settings>(path) {
            Ok(mut settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.initialize_dynamic_settings();
                    settings
                }
                Err(reason) => {
                    log::warn!("Rejecting settings from {}: {reason}", path.display());
                    Self::default()
                }
            },
            Err(PersistError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
