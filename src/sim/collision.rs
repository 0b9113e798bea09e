//! Pairwise collision checks between entity collections
//!
//! Stateless: each check looks only at the collections it is handed and
//! removes what it destroys. Deciding what a hit means (score, life loss,
//! level clear) is up to the world.

use super::geom::Rect;
use super::state::{Alien, Projectile};

/// Why the ship was lost this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipHit {
    /// Alien projectile struck the ship
    Shot,
    /// Alien body struck the ship
    Rammed,
    /// An alien reached the bottom of the screen
    Landed,
}

/// Destroy ship projectiles and aliens that overlap
///
/// Pairing is one-to-one: a projectile destroys at most one alien and an
/// alien absorbs at most one projectile. Returns the destroyed aliens in
/// fleet order.
pub fn ship_projectiles_vs_aliens(
    shots: &mut Vec<Projectile>,
    aliens: &mut Vec<Alien>,
) -> Vec<Alien> {
    let mut spent = vec![false; shots.len()];
    let mut hit = vec![false; aliens.len()];

    for (si, shot) in shots.iter().enumerate() {
        let rect = shot.rect();
        let target = (0..aliens.len()).find(|&ai| !hit[ai] && aliens[ai].rect().intersects(&rect));
        if let Some(ai) = target {
            hit[ai] = true;
            spent[si] = true;
        }
    }

    if !spent.contains(&true) {
        return Vec::new();
    }

    let mut spent = spent.into_iter();
    shots.retain(|_| !spent.next().unwrap_or(false));

    let mut destroyed = Vec::new();
    let mut survivors = Vec::with_capacity(aliens.len());
    for (alien, was_hit) in aliens.drain(..).zip(hit) {
        if was_hit {
            destroyed.push(alien);
        } else {
            survivors.push(alien);
        }
    }
    *aliens = survivors;
    destroyed
}

/// Id of the first projectile overlapping the target, if any
pub fn first_projectile_hit(projectiles: &[Projectile], target: &Rect) -> Option<u32> {
    projectiles
        .iter()
        .find(|p| p.rect().intersects(target))
        .map(|p| p.id)
}

/// Any alien body overlapping the target
pub fn any_alien_hit(aliens: &[Alien], target: &Rect) -> bool {
    aliens.iter().any(|a| a.rect().intersects(target))
}

/// Any alien whose lower edge reached the bottom of the screen
pub fn alien_reached_bottom(aliens: &[Alien], screen_height: f32) -> bool {
    aliens.iter().any(|a| a.rect().bottom() >= screen_height)
}

/// Mutually destroy overlapping ship/alien projectile pairs (one-to-one)
///
/// Returns the number of pairs destroyed.
pub fn projectiles_vs_projectiles(
    ship_shots: &mut Vec<Projectile>,
    alien_shots: &mut Vec<Projectile>,
) -> usize {
    let mut spent_alien = vec![false; alien_shots.len()];
    let mut spent_ship = vec![false; ship_shots.len()];
    let mut pairs = 0;

    for (si, shot) in ship_shots.iter().enumerate() {
        let rect = shot.rect();
        let other = (0..alien_shots.len())
            .find(|&ai| !spent_alien[ai] && alien_shots[ai].rect().intersects(&rect));
        if let Some(ai) = other {
            spent_alien[ai] = true;
            spent_ship[si] = true;
            pairs += 1;
        }
    }

    if pairs > 0 {
        let mut spent_ship = spent_ship.into_iter();
        ship_shots.retain(|_| !spent_ship.next().unwrap_or(false));
        let mut spent_alien = spent_alien.into_iter();
        alien_shots.retain(|_| !spent_alien.next().unwrap_or(false));
    }
    pairs
}
