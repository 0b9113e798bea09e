//! Alien fleet: formation layout and synchronized movement
//!
//! The fleet moves as one body. When any alien touches the edge the fleet
//! is heading toward, the whole formation drops and reverses in the same
//! tick, exactly once.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Alien, IdGen};
use crate::Settings;
use crate::consts::{ELEMENT_SPACING, SCOREBOARD_CLEARANCE};

/// Grid dimensions for a freshly spawned fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetLayout {
    pub columns: u32,
    pub rows: u32,
}

impl FleetLayout {
    pub const MAX_COLUMNS: u32 = 64;
    pub const MAX_ROWS: u32 = 32;

    /// Fit as many aliens as the screen allows, up to the grid cap
    ///
    /// Leaves one spaced alien-width of horizontal play for movement and
    /// keeps the ship plus a clearance band free below the bottom row.
    pub fn for_settings(settings: &Settings) -> Self {
        let w = settings.alien_width;
        let h = settings.alien_height;

        let available_x = settings.screen_width - ELEMENT_SPACING * w;
        let columns = (available_x / (ELEMENT_SPACING * w)).floor();

        let available_y = settings.screen_height - ELEMENT_SPACING * h - settings.ship_height;
        let rows = (available_y / (ELEMENT_SPACING * ELEMENT_SPACING * h)).floor();

        // Degenerate screens (or NaN from zero-sized aliens) give an empty fleet
        let count = |n: f32, max: u32| {
            if n.is_finite() && n > 0.0 {
                (n as u32).min(max)
            } else {
                0
            }
        };
        let layout = Self {
            columns: count(columns, Self::MAX_COLUMNS),
            rows: count(rows, Self::MAX_ROWS),
        };
        if columns > Self::MAX_COLUMNS as f32 || rows > Self::MAX_ROWS as f32 {
            log::warn!(
                "Fleet grid {columns}x{rows} capped to {}x{}",
                layout.columns,
                layout.rows
            );
        }
        layout
    }

    pub fn len(&self) -> usize {
        (self.columns as usize).saturating_mul(self.rows as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-left corner of the alien at a grid slot
    pub fn slot(&self, column: u32, row: u32, settings: &Settings) -> Vec2 {
        let w = settings.alien_width;
        let h = settings.alien_height;
        Vec2::new(
            w * (1.0 + ELEMENT_SPACING * column as f32),
            h * (SCOREBOARD_CLEARANCE + ELEMENT_SPACING * row as f32),
        )
    }
}

/// The alien formation (sole owner of the alien collection)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fleet {
    pub aliens: Vec<Alien>,
}

impl Fleet {
    /// Replace the fleet with a fresh formation
    pub fn spawn(&mut self, settings: &Settings, ids: &mut IdGen) {
        let layout = FleetLayout::for_settings(settings);
        self.aliens.clear();
        self.aliens.reserve(layout.len());
        for row in 0..layout.rows {
            for column in 0..layout.columns {
                let pos = layout.slot(column, row, settings);
                self.aliens.push(Alien::new(ids.next_id(), pos, settings));
            }
        }
        log::debug!(
            "Spawned fleet {}x{} ({} aliens)",
            layout.columns,
            layout.rows,
            self.aliens.len()
        );
    }

    pub fn clear(&mut self) {
        self.aliens.clear();
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// Remove an alien by id (no-op when already gone)
    pub fn remove(&mut self, id: u32) -> Option<Alien> {
        let idx = self.aliens.iter().position(|a| a.id == id)?;
        Some(self.aliens.remove(idx))
    }

    /// Move every alien one step; drop and reverse on edge contact
    ///
    /// Returns true when the fleet reversed this tick.
    pub fn advance(&mut self, settings: &mut Settings) -> bool {
        let dx = settings.alien_speed * settings.fleet_direction;
        for alien in &mut self.aliens {
            alien.pos.x += dx;
            alien.animate();
        }

        if !self.at_leading_edge(settings) {
            return false;
        }
        for alien in &mut self.aliens {
            alien.pos.y += settings.fleet_drop_speed;
        }
        settings.fleet_direction = -settings.fleet_direction;
        true
    }

    /// Any alien touching the screen edge the fleet is moving toward
    fn at_leading_edge(&self, settings: &Settings) -> bool {
        if settings.fleet_direction > 0.0 {
            self.aliens
                .iter()
                .any(|a| a.rect().right() >= settings.screen_width)
        } else {
            self.aliens.iter().any(|a| a.rect().left() <= 0.0)
        }
    }

    /// Uniformly random member, used as a firing origin
    pub fn random_alien<R: Rng>(&self, rng: &mut R) -> Option<&Alien> {
        if self.aliens.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.aliens.len());
        self.aliens.get(idx)
    }
}
