use sha2::{Digest, Sha256};

use crate::app::Vec2;

use super::text::for_each_text_pixel;
use super::{Rect, Renderer, Rgba, Texture, Viewport};

/// Software RGBA8 frame buffer implementing [`Renderer`].
///
/// Pixel centers sit at `(x + 0.5, y + 0.5)`. Writes replace the destination
/// pixel; there is no blending.
pub struct Canvas {
    width: u32,
    height: u32,
    frame: Vec<u8>,
    scanline_crossings: Vec<f32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: vec![0; width as usize * height as usize * 4],
            scanline_crossings: Vec::new(),
        }
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.frame.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// SHA-256 over the frame size and contents, lowercase hex.
    pub fn frame_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.frame);
        to_hex_lower(&hasher.finalize())
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.frame[offset..offset + 4].copy_from_slice(&color);
    }

    /// Fills `[x_start, x_end)` on row `y`, clipped.
    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Rgba) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let start = x_start.max(0);
        let end = x_end.min(self.width as i32);
        if end <= start {
            return;
        }
        let row = y as usize * self.width as usize;
        let span = &mut self.frame[(row + start as usize) * 4..(row + end as usize) * 4];
        for chunk in span.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }
}

impl Renderer for Canvas {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let x0 = rect.x.round() as i32;
        let x1 = rect.right().round() as i32;
        let y0 = (rect.y.round() as i32).max(0);
        let y1 = (rect.bottom().round() as i32).min(self.height as i32);
        for y in y0..y1 {
            self.fill_span(y, x0, x1, color);
        }
    }

    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Rgba) {
        let t = thickness.round().max(1.0);
        if rect.width <= t * 2.0 || rect.height <= t * 2.0 {
            self.fill_rect(rect, color);
            return;
        }
        let inner_height = rect.height - t * 2.0;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + t, t, inner_height), color);
        self.fill_rect(
            Rect::new(rect.right() - t, rect.y + t, t, inner_height),
            color,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if !(radius > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let radius_sq = radius * radius;
        let y0 = ((center.y - radius).floor() as i32).max(0);
        let y1 = ((center.y + radius).ceil() as i32).min(self.height as i32 - 1);
        let x0 = ((center.x - radius).floor() as i32).max(0);
        let x1 = ((center.x + radius).ceil() as i32).min(self.width as i32 - 1);
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= radius_sq {
                    self.write_pixel(x, y, color);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        let y_start = ((min_y - 0.5).ceil() as i32).max(0);
        let y_end = ((max_y - 0.5).floor() as i32).min(self.height as i32 - 1);

        let mut crossings = std::mem::take(&mut self.scanline_crossings);
        for y in y_start..=y_end {
            let sample_y = y as f32 + 0.5;
            crossings.clear();
            for (index, a) in points.iter().enumerate() {
                let b = points[(index + 1) % points.len()];
                if (a.y <= sample_y) != (b.y <= sample_y) {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let x_start = (pair[0] - 0.5).ceil() as i32;
                let x_end = (pair[1] - 0.5).ceil() as i32;
                self.fill_span(y, x_start, x_end, color);
            }
        }
        self.scanline_crossings = crossings;
    }

    fn outline_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 2 {
            return;
        }
        for (index, from) in points.iter().enumerate() {
            let to = points[(index + 1) % points.len()];
            self.draw_line(*from, to, color);
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some((from, to)) = clip_segment(
            from,
            to,
            (self.width - 1) as f32,
            (self.height - 1) as f32,
        ) else {
            return;
        };

        let (mut x, mut y) = (from.x.round() as i32, from.y.round() as i32);
        let (x_end, y_end) = (to.x.round() as i32, to.y.round() as i32);
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.write_pixel(x, y, color);
            if x == x_end && y == y_end {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn draw_textured_quad(&mut self, texture: &Texture, corners: [Vec2; 4]) {
        if texture.width() == 0 || texture.height() == 0 {
            return;
        }
        let [top_left, top_right, _, bottom_left] = corners;
        let u_axis = top_right - top_left;
        let v_axis = bottom_left - top_left;
        let det = u_axis.x * v_axis.y - v_axis.x * u_axis.y;
        if !det.is_finite() || det.abs() < f32::EPSILON {
            return;
        }

        let (min, max) = corners.iter().fold(
            (
                Vec2::new(f32::INFINITY, f32::INFINITY),
                Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            ),
            |(min, max), c| {
                (
                    Vec2::new(min.x.min(c.x), min.y.min(c.y)),
                    Vec2::new(max.x.max(c.x), max.y.max(c.y)),
                )
            },
        );
        let x0 = (min.x.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.width as i32);
        let y0 = (min.y.floor() as i32).max(0);
        let y1 = (max.y.ceil() as i32).min(self.height as i32);
        let tex_w = texture.width() as f32;
        let tex_h = texture.height() as f32;

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - top_left;
                let u = (d.x * v_axis.y - v_axis.x * d.y) / det;
                let v = (u_axis.x * d.y - u_axis.y * d.x) / det;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let texel = texture.texel((u * tex_w) as u32, (v * tex_h) as u32);
                if texel[3] == 0 {
                    continue;
                }
                self.write_pixel(x, y, texel);
            }
        }
    }

    fn draw_text(&mut self, origin: Vec2, text: &str, scale: i32, color: Rgba) {
        let x = origin.x.round() as i32;
        let y = origin.y.round() as i32;
        for_each_text_pixel(x, y, text, scale, |px, py| self.write_pixel(px, py, color));
    }
}

/// Liang-Barsky clip of a segment to `[0, max_x] x [0, max_y]`.
fn clip_segment(from: Vec2, to: Vec2, max_x: f32, max_y: f32) -> Option<(Vec2, Vec2)> {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return None;
    }
    let delta = to - from;
    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;
    for (p, q) in [
        (-delta.x, from.x),
        (delta.x, max_x - from.x),
        (-delta.y, from.y),
        (delta.y, max_y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t_exit {
                return None;
            }
            t_enter = t_enter.max(r);
        } else {
            if r < t_enter {
                return None;
            }
            t_exit = t_exit.min(r);
        }
    }
    Some((from + delta * t_enter, from + delta * t_exit))
}

fn to_hex_lower(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
