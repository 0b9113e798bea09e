//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Screen-space vertex with position and color, laid out for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const SHIP: [f32; 4] = [0.2, 0.4, 0.8, 1.0];
    pub const ALIEN: [f32; 4] = [0.2, 0.7, 0.3, 1.0];
    /// Second animation panel
    pub const ALIEN_ALT: [f32; 4] = [0.1, 0.5, 0.2, 1.0];
    pub const SHIP_BULLET: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const ALIEN_BULLET: [f32; 4] = [0.8, 0.1, 0.1, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
    pub const BUTTON: [f32; 4] = [0.5, 0.9, 0.5, 1.0];
}
