//! Attract-mode autopilot
//!
//! A simple heuristic that reads the world and decides the ship's intents
//! for the coming tick. It never mutates the world itself; the session
//! applies its decision through the same path as player input.

use crate::sim::World;

/// Movement and fire intents for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PilotDecision {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Heuristic ship controller for demo play
#[derive(Debug, Clone, Copy)]
pub struct DemoPilot {
    /// Stop chasing within this many ship-widths of the target
    pub pursue_widths: f32,
    /// Dodge projectiles within this many ship-widths of the ship's center
    pub dodge_widths: f32,
    /// Outer edge of the hold-still band beyond the dodge range
    pub hold_widths: f32,
}

impl Default for DemoPilot {
    fn default() -> Self {
        Self {
            pursue_widths: 2.0,
            dodge_widths: 1.5,
            hold_widths: 1.6,
        }
    }
}

impl DemoPilot {
    /// Decide the next tick's intents, or `None` with no fleet to chase
    pub fn decide(&self, world: &World) -> Option<PilotDecision> {
        let ship = world.ship.rect();
        let width = ship.size.x;
        let center = ship.center();

        // Every distance is measured between centers
        let target = world.fleet.aliens.iter().min_by(|a, b| {
            a.rect()
                .center()
                .distance_squared(center)
                .total_cmp(&b.rect().center().distance_squared(center))
        })?;

        let mut decision = PilotDecision::default();
        let gap = target.rect().center().x - center.x;
        let reach = self.pursue_widths * width;
        if gap - reach > 0.0 {
            decision.move_right = true;
        } else if gap + reach < 0.0 {
            decision.move_left = true;
        }

        // Dodging overrides pursuit; later projectiles win
        for projectile in &world.projectiles.alien {
            let dx = projectile.rect().center().x - center.x;
            if dx > 0.0 && dx < self.dodge_widths * width {
                decision.move_left = true;
                decision.move_right = false;
            } else if dx <= 0.0 && dx > -self.dodge_widths * width {
                decision.move_left = false;
                decision.move_right = true;
            } else if (self.dodge_widths * width..=self.hold_widths * width).contains(&dx.abs()) {
                decision.move_left = false;
                decision.move_right = false;
            }
        }

        decision.fire = gap.abs() <= reach;
        Some(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Alien, Faction, Projectile};
    use crate::{Difficulty, Settings};
    use glam::Vec2;

    fn world_with_alien_at(x: f32) -> World {
        let mut world = World::new(Settings::default(), 0, 3);
        world.start_demo();
        world.fleet.aliens = vec![Alien::new(500, Vec2::new(x, 100.0), &world.settings)];
        world
    }

    fn alien_shot(x: f32) -> Projectile {
        Projectile {
            id: 900,
            faction: Faction::Alien,
            pos: Vec2::new(x, 500.0),
            size: Vec2::new(3.0, 15.0),
        }
    }

    #[test]
    fn test_no_fleet_no_decision() {
        let mut world = World::new(Settings::default(), 0, 3);
        world.start_game(Difficulty::Easy);
        world.fleet.clear();
        assert_eq!(DemoPilot::default().decide(&world), None);
    }

    #[test]
    fn test_pursues_distant_alien() {
        // Ship center at x = 640, alien centers 30 right of their corner
        let pilot = DemoPilot::default();
        let right = pilot.decide(&world_with_alien_at(1000.0)).unwrap();
        assert!(right.move_right && !right.move_left && !right.fire);

        let left = pilot.decide(&world_with_alien_at(100.0)).unwrap();
        assert!(left.move_left && !left.move_right && !left.fire);
    }

    #[test]
    fn test_holds_and_fires_when_close() {
        let decision = DemoPilot::default()
            .decide(&world_with_alien_at(650.0))
            .unwrap();
        assert_eq!(
            decision,
            PilotDecision {
                move_left: false,
                move_right: false,
                fire: true
            }
        );
    }

    #[test]
    fn test_pursuit_and_fire_agree_at_reach() {
        // Alien center 520 sits exactly two ship-widths left of the ship center
        let decision = DemoPilot::default()
            .decide(&world_with_alien_at(490.0))
            .unwrap();
        assert_eq!(
            decision,
            PilotDecision {
                move_left: false,
                move_right: false,
                fire: true
            }
        );

        let decision = DemoPilot::default()
            .decide(&world_with_alien_at(489.0))
            .unwrap();
        assert!(decision.move_left && !decision.fire);
    }

    #[test]
    fn test_dodges_nearby_projectiles() {
        let pilot = DemoPilot::default();
        // Ship center x = 640, width 60: dodge range 90, hold band 90..=96
        let mut world = world_with_alien_at(1000.0);
        world.projectiles.alien.push(alien_shot(660.0));
        let d = pilot.decide(&world).unwrap();
        assert!(d.move_left && !d.move_right);

        world.projectiles.alien = vec![alien_shot(600.0)];
        let d = pilot.decide(&world).unwrap();
        assert!(d.move_right && !d.move_left);

        world.projectiles.alien = vec![alien_shot(733.0)];
        let d = pilot.decide(&world).unwrap();
        assert!(!d.move_right && !d.move_left);
    }
}
