use serde::{Deserialize, Serialize};

use crate::app::Vec2;

use super::Texture;

/// Straight (non-premultiplied) RGBA8, the channel order of the frame buffer.
pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned rectangle in screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Immediate-mode drawing capability the scenes draw through.
///
/// Coordinates are screen pixels. Implementations clip everything to their
/// viewport; nothing here can fail.
pub trait Renderer {
    fn viewport(&self) -> Viewport;
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);
    fn outline_polygon(&mut self, points: &[Vec2], color: Rgba);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba);
    /// `corners` are the screen positions of the texture's top-left,
    /// top-right, bottom-right and bottom-left texels, in that order.
    fn draw_textured_quad(&mut self, texture: &Texture, corners: [Vec2; 4]);
    fn draw_text(&mut self, origin: Vec2, text: &str, scale: i32, color: Rgba);
}
