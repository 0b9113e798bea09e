//! Projectile lifecycle: rate-limited spawning, movement, pruning
//!
//! Each faction has its own collection and its own cap on projectiles in
//! flight. A fire request over the cap is dropped silently.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{Faction, IdGen, Projectile};
use crate::Settings;

/// All projectiles in flight (sole owner of both collections)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projectiles {
    pub ship: Vec<Projectile>,
    pub alien: Vec<Projectile>,
}

impl Projectiles {
    /// Fire from the ship if under the ship cap
    pub fn fire_ship(&mut self, ship: &Rect, settings: &Settings, ids: &mut IdGen) -> bool {
        if self.ship.len() >= settings.ship_bullets_allowed {
            return false;
        }
        self.ship
            .push(Projectile::from_ship(ids.next_id(), ship, settings));
        true
    }

    /// Fire from an alien if under the (difficulty-scaled) alien cap
    pub fn fire_alien(&mut self, origin: &Rect, settings: &Settings, ids: &mut IdGen) -> bool {
        if self.alien.len() >= settings.alien_bullets_allowed {
            return false;
        }
        self.alien
            .push(Projectile::from_alien(ids.next_id(), origin, settings));
        true
    }

    /// Move everything one tick and drop projectiles that left the screen
    pub fn advance(&mut self, settings: &Settings) {
        let speed = settings.bullet_speed;
        let bottom = settings.screen_height;
        for list in [&mut self.ship, &mut self.alien] {
            for projectile in list.iter_mut() {
                projectile.advance(speed);
            }
            list.retain(|p| !p.is_off_screen(bottom));
        }
    }

    pub fn clear(&mut self) {
        self.ship.clear();
        self.alien.clear();
    }

    /// Remove a projectile by id (no-op when already gone)
    pub fn remove(&mut self, faction: Faction, id: u32) -> Option<Projectile> {
        let list = match faction {
            Faction::Ship => &mut self.ship,
            Faction::Alien => &mut self.alien,
        };
        let idx = list.iter().position(|p| p.id == id)?;
        Some(list.remove(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.ship.is_empty() && self.alien.is_empty()
    }
}
