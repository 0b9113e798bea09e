//! Entities and session statistics
//!
//! Plain positional containers with their own per-tick behavior. Ownership
//! lives elsewhere: the fleet owns aliens, the projectile manager owns
//! projectiles, the world owns the ship, explosions and stats.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::Settings;
use crate::consts::*;

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGen {
    next: u32,
}

impl Default for IdGen {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGen {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner (continuous)
    pub pos: Vec2,
    pub size: Vec2,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// Create a ship centered at the bottom of the screen
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(settings.ship_width, settings.ship_height),
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Center horizontally, bottom edge just above the screen bottom
    pub fn center(&mut self, settings: &Settings) {
        self.pos.x = (settings.screen_width - self.size.x) / 2.0;
        self.pos.y = settings.screen_height - SCREEN_EDGE_OFFSET - self.size.y;
    }

    /// Apply movement intents, never leaving the screen
    pub fn update(&mut self, settings: &Settings) {
        if self.moving_right && self.rect().right() < settings.screen_width {
            self.pos.x += settings.ship_speed;
        }
        if self.moving_left && self.rect().left() > 0.0 {
            self.pos.x -= settings.ship_speed;
        }
    }

    /// Drop both movement intents
    pub fn stop(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }
}

/// A single alien in the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    /// Top-left corner (continuous)
    pub pos: Vec2,
    pub size: Vec2,
    /// Animation panel (0 or 1)
    pub frame: u8,
    /// Ticks spent on the current panel
    pub frame_ticks: u32,
}

impl Alien {
    pub fn new(id: u32, pos: Vec2, settings: &Settings) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(settings.alien_width, settings.alien_height),
            frame: 0,
            frame_ticks: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Advance the two-panel animation
    pub fn animate(&mut self) {
        self.frame_ticks += 1;
        if self.frame_ticks >= ALIEN_FRAME_TICKS {
            self.frame = (self.frame + 1) % 2;
            self.frame_ticks = 0;
        }
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Ship,
    Alien,
}

impl Faction {
    /// Vertical direction of travel (screen y grows downward)
    pub fn direction(&self) -> f32 {
        match self {
            Faction::Ship => -1.0,
            Faction::Alien => 1.0,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub faction: Faction,
    /// Top-left corner (continuous; x is read by the demo pilot)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Projectile {
    /// Projectile leaving the ship, mid-top aligned with the ship's mid-top
    pub fn from_ship(id: u32, ship: &Rect, settings: &Settings) -> Self {
        let size = Vec2::new(settings.bullet_width, settings.bullet_height);
        let anchor = ship.mid_top();
        Self {
            id,
            faction: Faction::Ship,
            pos: Vec2::new(anchor.x - size.x / 2.0, anchor.y),
            size,
        }
    }

    /// Projectile dropped by an alien, mid-bottom aligned with the alien's mid-bottom
    pub fn from_alien(id: u32, alien: &Rect, settings: &Settings) -> Self {
        let size = Vec2::new(settings.bullet_width, settings.bullet_height);
        let anchor = alien.mid_bottom();
        Self {
            id,
            faction: Faction::Alien,
            pos: Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.pos.y += self.faction.direction() * speed;
    }

    /// Fully past the screen edge it is travelling toward
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        match self.faction {
            Faction::Ship => self.rect().bottom() <= 0.0,
            Faction::Alien => self.rect().top() >= screen_height,
        }
    }
}

/// Transient marker left where an alien was destroyed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    /// Ticks left before removal
    pub ttl_ticks: u32,
}

impl Explosion {
    /// Square explosion, side = alien height, centered on the alien
    pub fn at(id: u32, alien: &Rect) -> Self {
        Self {
            id,
            rect: Rect::from_center(alien.center(), Vec2::splat(alien.size.y)),
            ttl_ticks: EXPLOSION_TICKS,
        }
    }

    /// Count down; returns false once expired
    pub fn tick(&mut self) -> bool {
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
        self.ttl_ticks > 0
    }
}

/// Session statistics and mode flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u64,
    pub level: u32,
    pub ships_left: u32,
    /// Never decreases
    pub high_score: u64,
    pub active: bool,
    pub demo: bool,
    pub game_over: bool,
}

impl GameStats {
    /// Inactive stats for a fresh session
    pub fn new(ship_limit: u32, high_score: u64) -> Self {
        Self {
            score: 0,
            level: 1,
            ships_left: ship_limit,
            high_score,
            active: false,
            demo: false,
            game_over: false,
        }
    }

    /// Reset the values that change during a game (not the high score)
    pub fn reset(&mut self, ship_limit: u32) {
        self.ships_left = ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Add points; returns true when a new high score was set
    ///
    /// Demo play scores but never touches the high score.
    pub fn add_score(&mut self, points: u64) -> bool {
        self.score += points;
        if !self.demo && self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }
}

/// Things that happened during a tick (drives audio, HUD and pauses)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShipFired,
    AlienFired,
    AlienDestroyed { pos: Vec2 },
    ScoreChanged { score: u64 },
    HighScore { score: u64 },
    FleetReversed,
    LifeLost { ships_left: u32 },
    LevelUp { level: u32 },
    GameStarted,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_starts_centered() {
        let settings = Settings::default();
        let ship = Ship::new(&settings);
        assert_eq!(ship.rect().center().x, 640.0);
        assert_eq!(ship.rect().bottom(), 700.0);
    }

    #[test]
    fn test_ship_stays_on_screen() {
        let settings = Settings::default();
        let mut ship = Ship::new(&settings);
        ship.pos.x = 0.0;
        ship.moving_left = true;
        ship.update(&settings);
        assert_eq!(ship.pos.x, 0.0);

        ship.stop();
        ship.pos.x = settings.screen_width - ship.size.x;
        ship.moving_right = true;
        ship.update(&settings);
        assert_eq!(ship.pos.x, settings.screen_width - ship.size.x);
    }

    #[test]
    fn test_alien_animation_cycles() {
        let settings = Settings::default();
        let mut alien = Alien::new(1, Vec2::ZERO, &settings);
        for _ in 0..ALIEN_FRAME_TICKS {
            alien.animate();
        }
        assert_eq!(alien.frame, 1);
        for _ in 0..ALIEN_FRAME_TICKS {
            alien.animate();
        }
        assert_eq!(alien.frame, 0);
    }

    #[test]
    fn test_projectile_anchors_and_direction() {
        let settings = Settings::default();
        let ship = Rect::new(100.0, 600.0, 60.0, 48.0);
        let mut shot = Projectile::from_ship(1, &ship, &settings);
        assert_eq!(shot.rect().mid_top(), ship.mid_top());
        shot.advance(3.0);
        assert_eq!(shot.pos.y, 597.0);

        let alien = Rect::new(100.0, 100.0, 60.0, 40.0);
        let mut bomb = Projectile::from_alien(2, &alien, &settings);
        assert_eq!(bomb.rect().mid_bottom(), alien.mid_bottom());
        bomb.advance(3.0);
        assert_eq!(bomb.pos.y, 128.0);
    }

    #[test]
    fn test_off_screen() {
        let settings = Settings::default();
        let mut shot = Projectile::from_ship(1, &Rect::new(0.0, 0.0, 60.0, 48.0), &settings);
        shot.pos.y = -15.0;
        assert!(shot.is_off_screen(720.0));
        shot.pos.y = -14.0;
        assert!(!shot.is_off_screen(720.0));
    }

    #[test]
    fn test_explosion_expires() {
        let mut explosion = Explosion::at(1, &Rect::new(0.0, 0.0, 60.0, 40.0));
        assert_eq!(explosion.rect.size, Vec2::splat(40.0));
        let mut ticks = 1;
        while explosion.tick() {
            ticks += 1;
        }
        assert_eq!(ticks, EXPLOSION_TICKS);
    }

    #[test]
    fn test_demo_scoring_leaves_high_score() {
        let mut stats = GameStats::new(3, 100);
        stats.demo = true;
        assert!(!stats.add_score(500));
        assert_eq!(stats.high_score, 100);

        stats.demo = false;
        assert!(stats.add_score(50));
        assert_eq!(stats.high_score, 550);
    }
}
