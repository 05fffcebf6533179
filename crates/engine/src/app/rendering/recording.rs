use serde::Serialize;

use crate::app::Vec2;

use super::{Rect, Renderer, Rgba, Texture, Viewport};

/// One captured [`Renderer`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    Clear {
        color: Rgba,
    },
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    OutlineRect {
        rect: Rect,
        thickness: f32,
        color: Rgba,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    OutlinePolygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
    },
    TexturedQuad {
        texture_size: (u32, u32),
        corners: [Vec2; 4],
    },
    Text {
        origin: Vec2,
        text: String,
        scale: i32,
        color: Rgba,
    },
}

/// Renderer that records calls instead of drawing, for asserting what a scene
/// draws without a graphics context.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    viewport: Viewport,
    calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Renderer for RecordingRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Rgba) {
        self.calls.push(DrawCall::OutlineRect {
            rect,
            thickness,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.calls.push(DrawCall::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn outline_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.calls.push(DrawCall::OutlinePolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn draw_textured_quad(&mut self, texture: &Texture, corners: [Vec2; 4]) {
        self.calls.push(DrawCall::TexturedQuad {
            texture_size: (texture.width(), texture.height()),
            corners,
        });
    }

    fn draw_text(&mut self, origin: Vec2, text: &str, scale: i32, color: Rgba) {
        self.calls.push(DrawCall::Text {
            origin,
            text: text.to_string(),
            scale,
            color,
        });
    }
}
