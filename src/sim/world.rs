//! The world: single owner of every entity collection
//!
//! Managers get borrowed access to the pieces they need for one call;
//! nothing holds references across ticks. State transitions (new level,
//! life lost, game over) are applied here and reported as `GameEvent`s so
//! the session can drive audio, HUD and pauses.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, ShipHit};
use super::fleet::Fleet;
use super::projectiles::Projectiles;
use super::state::{Explosion, GameEvent, GameStats, IdGen, Ship};
use crate::{Difficulty, Settings};

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub stats: GameStats,
    pub ship: Ship,
    pub fleet: Fleet,
    pub projectiles: Projectiles,
    pub explosions: Vec<Explosion>,
    /// Simulation ticks run while active
    pub time_ticks: u64,
    ids: IdGen,
    rng: Pcg32,
    events: Vec<GameEvent>,
    /// A ship-hit transition already ran this tick
    ship_lost_this_tick: bool,
    /// A level-up already ran this tick
    leveled_this_tick: bool,
}

impl World {
    /// Inactive world showing a fresh fleet (start screen backdrop)
    pub fn new(settings: Settings, high_score: u64, seed: u64) -> Self {
        let mut world = Self {
            stats: GameStats::new(settings.ship_limit, high_score),
            ship: Ship::new(&settings),
            settings,
            fleet: Fleet::default(),
            projectiles: Projectiles::default(),
            explosions: Vec::new(),
            time_ticks: 0,
            ids: IdGen::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            ship_lost_this_tick: false,
            leveled_this_tick: false,
        };
        world.respawn_fleet();
        world
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a real game at the given difficulty
    pub fn start_game(&mut self, difficulty: Difficulty) {
        self.stats.reset(self.settings.ship_limit);
        self.stats.active = true;
        self.stats.demo = false;
        self.stats.game_over = false;

        self.settings.initialize_dynamic_settings();
        self.settings.set_difficulty(difficulty);

        self.reset_level();
        self.ship.stop();
        log::info!(
            "Game started ({}, alien cap {})",
            difficulty.as_str(),
            self.settings.alien_bullets_allowed
        );
        self.events.push(GameEvent::GameStarted);
    }

    /// Begin an attract-mode game (scores never reach the high score)
    pub fn start_demo(&mut self) {
        self.stats.reset(self.settings.ship_limit);
        self.stats.active = true;
        self.stats.demo = true;
        self.stats.game_over = false;
        self.settings.initialize_dynamic_settings();
        self.reset_level();
        self.ship.stop();
        log::info!("Demo started");
    }

    /// Stop any play and restore a fresh inactive backdrop
    ///
    /// Used when leaving the title screen or attract mode.
    pub fn reset_idle(&mut self) {
        self.stats.active = false;
        self.stats.demo = false;
        self.stats.reset(self.settings.ship_limit);
        self.settings.initialize_dynamic_settings();
        self.reset_level();
        self.ship.stop();
        log::debug!("World reset to idle");
    }

    /// Fire from the ship (silently ignored at the cap)
    pub fn fire_ship(&mut self) -> bool {
        let fired = self
            .projectiles
            .fire_ship(&self.ship.rect(), &self.settings, &mut self.ids);
        if fired {
            self.events.push(GameEvent::ShipFired);
        }
        fired
    }

    /// Run one simulation step in the fixed order:
    /// ship, projectiles (+ bullet collisions), fleet (+ fleet collisions),
    /// explosions.
    pub fn update(&mut self) {
        self.ship_lost_this_tick = false;
        self.leveled_this_tick = false;
        if !self.stats.active {
            return;
        }
        self.time_ticks += 1;

        self.ship.update(&self.settings);
        self.update_projectiles();
        if self.stats.active {
            self.update_fleet();
        }
        self.update_explosions();
    }

    /// Advance projectiles, then resolve every collision involving them
    fn update_projectiles(&mut self) {
        self.projectiles.advance(&self.settings);

        self.check_shot_alien_collisions();

        if let Some(id) =
            collision::first_projectile_hit(&self.projectiles.alien, &self.ship.rect())
        {
            log::debug!("Ship hit by projectile {id}");
            self.ship_hit(ShipHit::Shot);
        }

        let cancelled = collision::projectiles_vs_projectiles(
            &mut self.projectiles.ship,
            &mut self.projectiles.alien,
        );
        if cancelled > 0 {
            log::debug!("{cancelled} projectile pair(s) cancelled");
        }
    }

    /// Ship projectiles against aliens; scores, explosions, level clear
    fn check_shot_alien_collisions(&mut self) {
        let destroyed = collision::ship_projectiles_vs_aliens(
            &mut self.projectiles.ship,
            &mut self.fleet.aliens,
        );

        if !destroyed.is_empty() {
            for alien in &destroyed {
                let rect = alien.rect();
                self.explosions.push(Explosion::at(self.ids.next_id(), &rect));
                self.events.push(GameEvent::AlienDestroyed { pos: rect.center() });
            }
            let points = self.settings.alien_points * destroyed.len() as u64;
            let new_high = self.stats.add_score(points);
            self.events.push(GameEvent::ScoreChanged {
                score: self.stats.score,
            });
            if new_high {
                self.events.push(GameEvent::HighScore {
                    score: self.stats.high_score,
                });
            }
        }

        if self.level_cleared() {
            self.start_new_level();
        }
    }

    /// Move the fleet, let aliens fire, then check the fleet against the ship
    fn update_fleet(&mut self) {
        if self.fleet.advance(&mut self.settings) {
            log::debug!("Fleet reversed (direction {})", self.settings.fleet_direction);
            self.events.push(GameEvent::FleetReversed);
        }

        // One fire attempt per alien, each from a random member
        for _ in 0..self.fleet.len() {
            if self.projectiles.alien.len() >= self.settings.alien_bullets_allowed {
                break;
            }
            let Some(origin) = self.fleet.random_alien(&mut self.rng).map(|a| a.rect()) else {
                break;
            };
            if self
                .projectiles
                .fire_alien(&origin, &self.settings, &mut self.ids)
            {
                self.events.push(GameEvent::AlienFired);
            }
        }

        if collision::any_alien_hit(&self.fleet.aliens, &self.ship.rect()) {
            self.ship_hit(ShipHit::Rammed);
        }
        if collision::alien_reached_bottom(&self.fleet.aliens, self.settings.screen_height) {
            self.ship_hit(ShipHit::Landed);
        }
    }

    fn update_explosions(&mut self) {
        self.explosions.retain_mut(|e| e.tick());
    }

    /// No aliens and no explosions left
    pub fn level_cleared(&self) -> bool {
        self.fleet.is_empty() && self.explosions.is_empty()
    }

    /// End-of-tick level check (covers fleets that spawned empty)
    ///
    /// Runs at most one level-up per tick.
    pub fn check_level_clear(&mut self) {
        if self.stats.active && !self.leveled_this_tick && self.level_cleared() {
            self.start_new_level();
        }
    }

    /// Clear projectiles and explosions, respawn the fleet, escalate
    pub fn start_new_level(&mut self) {
        self.leveled_this_tick = true;
        self.projectiles.clear();
        self.explosions.clear();
        self.respawn_fleet();
        self.ship.center(&self.settings);
        self.settings.increase_speed();
        self.stats.level += 1;
        log::info!(
            "Level {} (alien speed {:.2}, {} pts/alien)",
            self.stats.level,
            self.settings.alien_speed,
            self.settings.alien_points
        );
        self.events.push(GameEvent::LevelUp {
            level: self.stats.level,
        });
    }

    /// Clear everything, respawn the fleet and recenter the ship
    ///
    /// Score and level are untouched.
    pub fn reset_level(&mut self) {
        self.projectiles.clear();
        self.explosions.clear();
        self.respawn_fleet();
        self.ship.center(&self.settings);
    }

    fn respawn_fleet(&mut self) {
        self.settings.fleet_direction = 1.0;
        self.fleet.spawn(&self.settings, &mut self.ids);
    }

    /// Life loss or game over, at most once per tick
    ///
    /// The hit that takes the last ship ends the game; in demo play it only
    /// leaves `ships_left` at zero for the session to end attract mode.
    fn ship_hit(&mut self, cause: ShipHit) {
        if self.ship_lost_this_tick || !self.stats.active {
            return;
        }
        self.ship_lost_this_tick = true;
        self.stats.ships_left = self.stats.ships_left.saturating_sub(1);
        log::info!("Ship lost ({cause:?}), {} left", self.stats.ships_left);

        if self.stats.ships_left > 0 {
            self.events.push(GameEvent::LifeLost {
                ships_left: self.stats.ships_left,
            });
            self.reset_level();
        } else if !self.stats.demo {
            self.game_over();
        }
    }

    /// Stop play and reset the dynamic settings
    pub fn game_over(&mut self) {
        self.stats.active = false;
        self.stats.game_over = true;
        self.settings.initialize_dynamic_settings();
        self.ship.stop();
        log::info!(
            "Game over at level {} with score {}",
            self.stats.level,
            self.stats.score
        );
        self.events.push(GameEvent::GameOver);
    }
}
