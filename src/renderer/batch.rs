//! Vertex-batching render surface
//!
//! Accumulates triangles for the frame in progress and swaps them into
//! `presented` on `present_frame`, so the last shown frame stays available
//! (a paused game keeps showing it).

use super::shapes;
use super::vertex::{Vertex, colors};
use super::{Overlay, RenderSurface, Sprite, SpriteKind};
use crate::ui::Scoreboard;

#[derive(Debug, Default)]
pub struct SpriteBatch {
    pending: Vec<Vertex>,
    pending_text: Vec<String>,
    presented: Vec<Vertex>,
    presented_text: Vec<String>,
    frames: u64,
    cursor_visible: bool,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            ..Default::default()
        }
    }

    /// Triangles of the last presented frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.presented
    }

    /// Packed vertex bytes, ready for a GPU buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.presented)
    }

    /// Text lines of the last presented frame
    pub fn text(&self) -> &[String] {
        &self.presented_text
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

impl RenderSurface for SpriteBatch {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        let rect = &sprite.rect;
        match sprite.kind {
            SpriteKind::Ship => self.pending.extend(shapes::quad(rect, colors::SHIP)),
            SpriteKind::Alien { frame } => {
                let color = if frame == 0 { colors::ALIEN } else { colors::ALIEN_ALT };
                self.pending.extend(shapes::quad(rect, color));
            }
            SpriteKind::ShipProjectile => {
                self.pending.extend(shapes::quad(rect, colors::SHIP_BULLET))
            }
            SpriteKind::AlienProjectile => {
                self.pending.extend(shapes::quad(rect, colors::ALIEN_BULLET))
            }
            SpriteKind::Explosion { life } => {
                self.pending
                    .extend(shapes::burst(rect, life, colors::EXPLOSION))
            }
        }
    }

    fn draw_hud(&mut self, hud: &Scoreboard) {
        self.pending_text.push(hud.score.clone());
        self.pending_text.push(hud.high_score.clone());
        self.pending_text.push(hud.level.clone());
    }

    fn draw_overlay(&mut self, overlay: &Overlay<'_>) {
        match overlay {
            Overlay::Title { show_prompt } => {
                self.pending_text.push("Alien Invasion".to_string());
                if *show_prompt {
                    self.pending_text.push("Press any key to start".to_string());
                }
            }
            Overlay::Menu { buttons, game_over } => {
                for button in buttons.iter() {
                    self.pending.extend(shapes::quad(&button.rect, colors::BUTTON));
                    self.pending_text.push(button.label.to_string());
                }
                if *game_over {
                    self.pending_text.push("Game Over".to_string());
                }
            }
        }
    }

    fn present_frame(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.presented);
        std::mem::swap(&mut self.pending_text, &mut self.presented_text);
        self.pending.clear();
        self.pending_text.clear();
        self.frames += 1;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            log::debug!("Cursor {}", if visible { "shown" } else { "hidden" });
        }
        self.cursor_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Rect;

    #[test]
    fn test_present_swaps_frames() {
        let mut batch = SpriteBatch::new();
        batch.draw_sprite(&Sprite {
            kind: SpriteKind::Ship,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        });
        assert!(batch.vertices().is_empty());

        batch.present_frame();
        assert_eq!(batch.vertices().len(), 6);
        assert_eq!(batch.vertex_bytes().len(), 6 * Vertex::STRIDE);
        assert_eq!(batch.frames_presented(), 1);

        // Empty frame replaces the previous one
        batch.present_frame();
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn test_title_prompt_blinks() {
        let mut batch = SpriteBatch::new();
        batch.draw_overlay(&Overlay::Title { show_prompt: true });
        batch.present_frame();
        assert_eq!(batch.text().len(), 2);
        batch.draw_overlay(&Overlay::Title { show_prompt: false });
        batch.present_frame();
        assert_eq!(batch.text(), ["Alien Invasion".to_string()]);
    }
}
