use glam::{Mat4, Vec3, Vec4Swizzles};
use map_engine::{Renderer, Rgba, Vec2, Viewport};

use super::movement::CameraState;

const CLEAR_COLOR: Rgba = [0, 0, 0, 255];

/// Index pairs into [`Cuboid::corners`] for the 12 box edges.
const CUBOID_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Linear RGB in `0.0..=1.0`.
pub(crate) type Color3 = [f32; 3];

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cuboid {
    pub(crate) name: &'static str,
    pub(crate) center: Vec3,
    pub(crate) size: Vec3,
    pub(crate) color: Color3,
}

impl Cuboid {
    /// Corner `i` takes the max extent on x, y, z when bit 0, 1, 2 is set.
    pub(crate) fn corners(&self) -> [Vec3; 8] {
        let half = self.size * 0.5;
        std::array::from_fn(|index| {
            let sign = Vec3::new(
                if index & 1 == 0 { -1.0 } else { 1.0 },
                if index & 2 == 0 { -1.0 } else { 1.0 },
                if index & 4 == 0 { -1.0 } else { 1.0 },
            );
            self.center + half * sign
        })
    }

    pub(crate) fn edges(&self) -> [(Vec3, Vec3); 12] {
        let corners = self.corners();
        CUBOID_EDGES.map(|(a, b)| (corners[a], corners[b]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GroundQuad {
    pub(crate) half_extent: f32,
    pub(crate) height: f32,
    pub(crate) color: Color3,
}

impl GroundQuad {
    pub(crate) fn corners(&self) -> [Vec3; 4] {
        let e = self.half_extent;
        [
            Vec3::new(-e, self.height, -e),
            Vec3::new(-e, self.height, e),
            Vec3::new(e, self.height, e),
            Vec3::new(e, self.height, -e),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireLayout {
    pub(crate) ground: GroundQuad,
    pub(crate) cuboids: Vec<Cuboid>,
}

impl WireLayout {
    pub(crate) fn campus() -> Self {
        let block_color = [0.7, 0.7, 0.9];
        Self {
            ground: GroundQuad {
                half_extent: 50.0,
                height: 0.0,
                color: [0.6, 0.8, 0.6],
            },
            cuboids: vec![
                Cuboid {
                    name: "block_a",
                    center: Vec3::new(-10.0, 3.0, 0.0),
                    size: Vec3::new(8.0, 6.0, 8.0),
                    color: block_color,
                },
                Cuboid {
                    name: "block_b",
                    center: Vec3::new(10.0, 3.0, 0.0),
                    size: Vec3::new(8.0, 6.0, 8.0),
                    color: block_color,
                },
                Cuboid {
                    name: "canteen",
                    center: Vec3::new(0.0, 1.0, 15.0),
                    size: Vec3::new(6.0, 2.0, 6.0),
                    color: [0.9, 0.8, 0.6],
                },
                Cuboid {
                    name: "car_park",
                    center: Vec3::new(0.0, -1.0, -15.0),
                    size: Vec3::new(10.0, 2.0, 10.0),
                    color: [0.5, 0.5, 0.5],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Projection {
    pub(crate) fov_y_radians: f32,
    pub(crate) aspect: f32,
    pub(crate) near: f32,
    pub(crate) far: f32,
}

impl Projection {
    pub(crate) fn for_viewport(viewport: Viewport) -> Self {
        Self {
            fov_y_radians: 60.0_f32.to_radians(),
            aspect: viewport.width as f32 / viewport.height.max(1) as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_radians, self.aspect, self.near, self.far)
    }
}

/// Camera-derived transforms for one frame.
pub(crate) struct ViewTransform {
    view: Mat4,
    projection: Mat4,
    near: f32,
    far: f32,
    eye: Vec3,
    viewport: Viewport,
}

impl ViewTransform {
    pub(crate) fn new(camera: &CameraState, projection: &Projection, viewport: Viewport) -> Self {
        Self {
            view: Mat4::look_at_rh(camera.position, camera.look_target(), camera.up),
            projection: projection.matrix(),
            near: projection.near,
            far: projection.far,
            eye: camera.position,
            viewport,
        }
    }

    fn to_view(&self, point: Vec3) -> Vec3 {
        self.view.transform_point3(point)
    }

    /// Maps a view-space point inside the depth range to screen pixels.
    fn view_to_screen(&self, point: Vec3) -> Vec2 {
        let clip = self.projection * point.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.width as f32,
            (1.0 - ndc.y) * 0.5 * self.viewport.height as f32,
        )
    }

    /// Projects a world-space segment, clipped to the near and far planes.
    pub(crate) fn project_segment(&self, from: Vec3, to: Vec3) -> Option<(Vec2, Vec2)> {
        let (a, b) = clip_segment_depth(self.to_view(from), self.to_view(to), self.near, self.far)?;
        Some((self.view_to_screen(a), self.view_to_screen(b)))
    }

    /// Projects a world-space polygon, clipped to the near and far planes.
    pub(crate) fn project_polygon(&self, points: &[Vec3]) -> Vec<Vec2> {
        let view_points: Vec<Vec3> = points.iter().map(|p| self.to_view(*p)).collect();
        let clipped = clip_polygon_plane(&view_points, |p| -p.z - self.near);
        let clipped = clip_polygon_plane(&clipped, |p| self.far + p.z);
        clipped.into_iter().map(|p| self.view_to_screen(p)).collect()
    }

    /// Pieces of a world-space segment not hidden behind the ground quad.
    ///
    /// A point beyond the ground plane is hidden only when the line of sight
    /// to it crosses the plane inside the quad. Along a segment that set is a
    /// single interval, so at most three pieces survive.
    pub(crate) fn visible_parts(
        &self,
        from: Vec3,
        to: Vec3,
        ground: &GroundQuad,
    ) -> Vec<(Vec3, Vec3)> {
        let eye_height = self.eye.y - ground.height;
        if eye_height == 0.0 {
            return vec![(from, to)];
        }
        let toward_eye = |p: Vec3| (p.y - ground.height) * eye_height.signum();

        let mut parts = Vec::with_capacity(3);
        if let Some(front) = clip_segment_plane(from, to, toward_eye) {
            parts.push(front);
        }
        if toward_eye(from) >= 0.0 && toward_eye(to) >= 0.0 {
            return parts;
        }
        let Some((a, b)) = clip_segment_plane(from, to, |p| -toward_eye(p)) else {
            return parts;
        };

        // Where the sight lines to `a` and `b` meet the plane. The weights are
        // at least 1 for any point beyond the plane.
        let weight = |p: Vec3| (self.eye.y - p.y) / eye_height;
        let (wa, wb) = (weight(a), weight(b));
        let hit_a = self.eye + (a - self.eye) / wa;
        let hit_b = self.eye + (b - self.eye) / wb;

        match clip_span_to_square(hit_a, hit_b, ground.half_extent) {
            None => parts.push((a, b)),
            Some((s0, s1)) => {
                // Parameters on the plane are projective in the segment's own.
                let to_segment = |s: f32| s * wa / ((1.0 - s) * wb + s * wa);
                let (u0, u1) = (to_segment(s0), to_segment(s1));
                if u0 > 0.0 {
                    parts.push((a, a.lerp(b, u0)));
                }
                if u1 < 1.0 {
                    parts.push((a.lerp(b, u1), b));
                }
            }
        }
        parts
    }
}

/// Clears to black, fills the ground, then draws every cuboid's edges.
pub(crate) fn draw_walkthrough(
    renderer: &mut dyn Renderer,
    layout: &WireLayout,
    camera: &CameraState,
    projection: &Projection,
) {
    let transform = ViewTransform::new(camera, projection, renderer.viewport());
    renderer.clear(CLEAR_COLOR);

    let ground = transform.project_polygon(&layout.ground.corners());
    if ground.len() >= 3 {
        renderer.fill_polygon(&ground, to_rgba(layout.ground.color));
    }

    for cuboid in &layout.cuboids {
        let color = to_rgba(cuboid.color);
        for (from, to) in cuboid.edges() {
            for (from, to) in transform.visible_parts(from, to, &layout.ground) {
                if let Some((a, b)) = transform.project_segment(from, to) {
                    renderer.draw_line(a, b, color);
                }
            }
        }
    }
}

pub(crate) fn to_rgba(color: Color3) -> Rgba {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color[0]), channel(color[1]), channel(color[2]), 255]
}

/// View space looks down -z, so visible depth is `-far <= z <= -near`.
fn clip_segment_depth(a: Vec3, b: Vec3, near: f32, far: f32) -> Option<(Vec3, Vec3)> {
    let (a, b) = clip_segment_plane(a, b, |p| -p.z - near)?;
    clip_segment_plane(a, b, |p| far + p.z)
}

/// Keeps the part of `a..b` where `distance >= 0`.
fn clip_segment_plane(
    a: Vec3,
    b: Vec3,
    distance: impl Fn(Vec3) -> f32,
) -> Option<(Vec3, Vec3)> {
    let da = distance(a);
    let db = distance(b);
    match (da >= 0.0, db >= 0.0) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (true, false) => Some((a, a.lerp(b, da / (da - db)))),
        (false, true) => Some((a.lerp(b, da / (da - db)), b)),
    }
}

/// Liang-Barsky on x/z: the parameter span of `a..b` inside
/// `[-half_extent, half_extent]` on both axes.
fn clip_span_to_square(a: Vec3, b: Vec3, half_extent: f32) -> Option<(f32, f32)> {
    let delta = b - a;
    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;
    for (p, q) in [
        (-delta.x, a.x + half_extent),
        (delta.x, half_extent - a.x),
        (-delta.z, a.z + half_extent),
        (delta.z, half_extent - a.z),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(r);
        } else {
            t_exit = t_exit.min(r);
        }
    }
    (t_enter <= t_exit).then_some((t_enter, t_exit))
}

/// Sutherland-Hodgman against one plane, keeping `distance >= 0`.
fn clip_polygon_plane(points: &[Vec3], distance: impl Fn(Vec3) -> f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(points.len() + 2);
    for (index, &current) in points.iter().enumerate() {
        let next = points[(index + 1) % points.len()];
        let dc = distance(current);
        let dn = distance(next);
        if dc >= 0.0 {
            out.push(current);
        }
        if (dc >= 0.0) != (dn >= 0.0) {
            out.push(current.lerp(next, dc / (dc - dn)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn cuboid_has_eight_distinct_corners_and_unit_axis_edges() {
        let cuboid = WireLayout::campus().cuboids[0];
        let corners = cuboid.corners();
        assert_eq!(corners[0], Vec3::new(-14.0, 0.0, -4.0));
        assert_eq!(corners[7], Vec3::new(-6.0, 6.0, 4.0));

        for (a, b) in cuboid.edges() {
            let axes_changed = [a.x != b.x, a.y != b.y, a.z != b.z]
                .iter()
                .filter(|changed| **changed)
                .count();
            assert_eq!(axes_changed, 1, "edge {a:?} -> {b:?} is not axis-aligned");
        }
    }

    #[test]
    fn point_straight_ahead_projects_to_screen_center() {
        let camera = CameraState::spawn();
        let transform =
            ViewTransform::new(&camera, &Projection::for_viewport(viewport()), viewport());
        let ahead = camera.position + Vec3::new(0.0, 0.0, -5.0);

        let (a, b) = transform
            .project_segment(ahead, ahead + Vec3::new(0.0, 0.0, -1.0))
            .expect("visible");
        assert!((a.x - 400.0).abs() < 1e-3 && (a.y - 300.0).abs() < 1e-3);
        assert!((b.x - 400.0).abs() < 1e-3 && (b.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn segment_behind_camera_is_dropped() {
        let camera = CameraState::spawn();
        let transform =
            ViewTransform::new(&camera, &Projection::for_viewport(viewport()), viewport());
        let behind = camera.position + Vec3::new(0.0, 0.0, 3.0);
        assert!(transform
            .project_segment(behind, behind + Vec3::X)
            .is_none());
    }

    #[test]
    fn segment_crossing_near_plane_is_shortened() {
        let (a, b) = clip_segment_depth(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -9.0),
            0.1,
            100.0,
        )
        .expect("partly visible");
        assert!((a.z + 0.1).abs() < 1e-5);
        assert_eq!(b, Vec3::new(0.0, 0.0, -9.0));
    }

    #[test]
    fn polygon_clip_cuts_at_plane() {
        let square = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(-1.0, 2.0, 0.0),
        ];
        let clipped = clip_polygon_plane(&square, |p| p.y - 1.0);
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|p| p.y >= 1.0 - 1e-6));
    }

    #[test]
    fn edges_under_the_ground_are_hidden_from_above() {
        let camera = CameraState::spawn();
        let transform =
            ViewTransform::new(&camera, &Projection::for_viewport(viewport()), viewport());
        let ground = WireLayout::campus().ground;

        let buried = transform.visible_parts(
            Vec3::new(-5.0, -2.0, -20.0),
            Vec3::new(5.0, -2.0, -20.0),
            &ground,
        );
        assert!(buried.is_empty());

        let post = transform.visible_parts(
            Vec3::new(-5.0, -2.0, -20.0),
            Vec3::new(-5.0, 0.0, -20.0),
            &ground,
        );
        assert_eq!(post.len(), 1, "only the top end touches the ground");
        let (low, high) = post[0];
        assert_eq!(low, high);
        assert_eq!(high.y, 0.0);
    }

    #[test]
    fn edges_seen_past_the_ground_edge_stay_visible() {
        let camera = CameraState {
            position: Vec3::new(0.0, 1.0, 85.0),
            ..CameraState::spawn()
        };
        let transform =
            ViewTransform::new(&camera, &Projection::for_viewport(viewport()), viewport());
        let ground = WireLayout::campus().ground;

        // Sight lines meet y = 0 at z = 53.3, beyond the quad's far edge.
        let from = Vec3::new(-5.0, -2.0, -10.0);
        let to = Vec3::new(5.0, -2.0, -10.0);
        assert_eq!(transform.visible_parts(from, to, &ground), vec![(from, to)]);
        assert!(transform.project_segment(from, to).is_some());
    }

    #[test]
    fn edge_behind_the_ground_edge_is_cut_where_the_quad_stops_covering_it() {
        let camera = CameraState {
            position: Vec3::new(0.0, 1.0, 85.0),
            ..CameraState::spawn()
        };
        let transform =
            ViewTransform::new(&camera, &Projection::for_viewport(viewport()), viewport());
        let ground = WireLayout::campus().ground;

        let parts = transform.visible_parts(
            Vec3::new(0.0, -2.0, -40.0),
            Vec3::new(0.0, -2.0, -10.0),
            &ground,
        );
        assert_eq!(parts.len(), 1);
        let (near_cut, far_end) = parts[0];
        assert!((near_cut - Vec3::new(0.0, -2.0, -20.0)).length() < 1e-3);
        assert_eq!(far_end, Vec3::new(0.0, -2.0, -10.0));
    }

    #[test]
    fn edges_above_the_ground_are_untouched() {
        let transform = ViewTransform::new(
            &CameraState::spawn(),
            &Projection::for_viewport(viewport()),
            viewport(),
        );
        let ground = WireLayout::campus().ground;
        let from = Vec3::new(-14.0, 0.0, -4.0);
        let to = Vec3::new(-14.0, 6.0, -4.0);
        assert_eq!(transform.visible_parts(from, to, &ground), vec![(from, to)]);
    }

    #[test]
    fn float_colors_scale_to_bytes() {
        assert_eq!(to_rgba([0.6, 0.8, 0.6]), [153, 204, 153, 255]);
        assert_eq!(to_rgba([0.5, 0.5, 0.5]), [128, 128, 128, 255]);
    }
}
