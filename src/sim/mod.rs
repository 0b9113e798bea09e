//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick only (every speed is distance per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Rendering, audio and timing reached only through the session's seams

pub mod collision;
pub mod fleet;
pub mod geom;
pub mod projectiles;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::ShipHit;
pub use fleet::{Fleet, FleetLayout};
pub use geom::Rect;
pub use projectiles::Projectiles;
pub use state::{Alien, Explosion, Faction, GameEvent, GameStats, IdGen, Projectile, Ship};
pub use tick::{Control, GamePhase, Session};
pub use world::World;
