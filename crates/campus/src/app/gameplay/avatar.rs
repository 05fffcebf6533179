use map_engine::{Renderer, Rgba, Texture, Vec2};

use super::movement::AvatarState;

const WEDGE_FILL_COLOR: Rgba = [228, 62, 50, 255];
const WEDGE_OUTLINE_COLOR: Rgba = [44, 12, 10, 255];

/// Wedge vertices around its centroid, tip pointing at facing 0 (screen up).
const WEDGE_POINTS: [Vec2; 3] = [
    Vec2::new(0.0, -24.0),
    Vec2::new(18.0, 12.0),
    Vec2::new(-18.0, 12.0),
];

#[derive(Debug, Clone)]
pub(crate) enum AvatarLook {
    Sprite(Texture),
    Wedge,
}

pub(crate) fn draw_avatar(renderer: &mut dyn Renderer, look: &AvatarLook, avatar: &AvatarState) {
    let radians = avatar.facing.radians();
    match look {
        AvatarLook::Sprite(texture) => {
            let corners = sprite_corners(avatar.position, avatar.half_size, radians);
            renderer.draw_textured_quad(texture, corners);
        }
        AvatarLook::Wedge => {
            let points = wedge_points(avatar.position, radians);
            renderer.fill_polygon(&points, WEDGE_FILL_COLOR);
            renderer.outline_polygon(&points, WEDGE_OUTLINE_COLOR);
        }
    }
}

/// Screen corners of the sprite quad: top-left, top-right, bottom-right,
/// bottom-left of the unrotated image.
pub(crate) fn sprite_corners(center: Vec2, half_size: f32, radians: f32) -> [Vec2; 4] {
    [
        Vec2::new(-half_size, -half_size),
        Vec2::new(half_size, -half_size),
        Vec2::new(half_size, half_size),
        Vec2::new(-half_size, half_size),
    ]
    .map(|offset| center + offset.rotated(radians))
}

pub(crate) fn wedge_points(center: Vec2, radians: f32) -> [Vec2; 3] {
    WEDGE_POINTS.map(|offset| center + offset.rotated(radians))
}
