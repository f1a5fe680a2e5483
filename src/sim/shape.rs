//! Renderable shape capability
//!
//! Shapes are drawn by the rendering collaborator, once per live entity per
//! frame. The simulation only stores them and swaps them (e.g. an enemy turning
//! to ice); it never calls `render` during a tick.

use std::fmt;

/// RGBA color packed as 0xRRGGBBAA
pub type Color = u32;

pub const WHITE: Color = 0xFFFF_FFFF;
pub const BLACK: Color = 0x0000_00FF;

/// Asset keys understood by the renderer
pub mod assets {
    pub const PLAYER: &str = "player";
    pub const BULLET: &str = "bullet";
    pub const ENEMY: &str = "enemy";
    pub const FROZEN_ENEMY: &str = "enemy_frozen";
}

/// Drawing target provided by the rendering collaborator
pub trait Surface {
    /// Draw an image asset centered at (x, y)
    fn draw_sprite(&mut self, asset: &str, x: f64, y: f64, angle: f64, scale: f64, layer: i32);

    /// Fill an axis-aligned rectangle with its top-left corner at (x, y)
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, layer: i32);
}

pub trait Shape: fmt::Debug {
    fn render(&self, surface: &mut dyn Surface, x: f64, y: f64, angle: f64, scale: f64, layer: i32);
}

/// Image-backed shape; holds only the asset key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    asset: String,
}

impl Sprite {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
        }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }
}

impl Shape for Sprite {
    fn render(&self, surface: &mut dyn Surface, x: f64, y: f64, angle: f64, scale: f64, layer: i32) {
        surface.draw_sprite(&self.asset, x, y, angle, scale, layer);
    }
}

/// Solid block with a 2-unit white outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockShape {
    pub width: f64,
    pub height: f64,
}

impl BlockShape {
    const OUTLINE: f64 = 2.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Shape for BlockShape {
    fn render(&self, surface: &mut dyn Surface, x: f64, y: f64, _angle: f64, scale: f64, layer: i32) {
        let (w, h) = (self.width * scale, self.height * scale);
        let o = Self::OUTLINE;
        surface.fill_rect(x - o, y - o, w + 2.0 * o, h + 2.0 * o, WHITE, layer);
        surface.fill_rect(x, y, w, h, BLACK, layer);
    }
}
