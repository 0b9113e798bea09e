//! Rendering seam
//!
//! The session describes each frame as sprites, HUD text and an optional
//! overlay; a `RenderSurface` turns that into pixels. `SpriteBatch` is the
//! bundled surface: it tessellates into GPU-ready vertices.

pub mod batch;
pub mod shapes;
pub mod vertex;

pub use batch::SpriteBatch;

use crate::sim::World;
use crate::sim::geom::Rect;
use crate::ui::{MenuButton, Scoreboard};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    Ship,
    Alien { frame: u8 },
    ShipProjectile,
    AlienProjectile,
    /// `life` runs from 1.0 (fresh) to 0.0 (expired)
    Explosion { life: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

/// Screen-level overlays drawn above the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay<'a> {
    /// Title screen; the prompt blinks
    Title { show_prompt: bool },
    /// Difficulty buttons, with the game-over banner after a loss
    Menu {
        buttons: &'a [MenuButton],
        game_over: bool,
    },
}

/// Something a frame can be drawn onto
pub trait RenderSurface {
    fn draw_sprite(&mut self, sprite: &Sprite);
    fn draw_hud(&mut self, hud: &Scoreboard);
    fn draw_overlay(&mut self, overlay: &Overlay<'_>);
    /// Make the frame drawn since the last call visible
    fn present_frame(&mut self);
    fn set_cursor_visible(&mut self, visible: bool);
}

/// Every world entity as a sprite, back to front
pub fn world_sprites(world: &World) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(
        1 + world.fleet.len()
            + world.projectiles.ship.len()
            + world.projectiles.alien.len()
            + world.explosions.len(),
    );

    sprites.push(Sprite {
        kind: SpriteKind::Ship,
        rect: world.ship.rect(),
    });
    sprites.extend(world.projectiles.ship.iter().map(|p| Sprite {
        kind: SpriteKind::ShipProjectile,
        rect: p.rect(),
    }));
    sprites.extend(world.projectiles.alien.iter().map(|p| Sprite {
        kind: SpriteKind::AlienProjectile,
        rect: p.rect(),
    }));
    sprites.extend(world.fleet.aliens.iter().map(|a| Sprite {
        kind: SpriteKind::Alien { frame: a.frame },
        rect: a.rect(),
    }));
    sprites.extend(world.explosions.iter().map(|e| Sprite {
        kind: SpriteKind::Explosion {
            life: e.ttl_ticks as f32 / crate::consts::EXPLOSION_TICKS as f32,
        },
        rect: e.rect,
    }));
    sprites
}
