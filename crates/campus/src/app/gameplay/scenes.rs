use map_engine::{InputSnapshot, Renderer, Scene, Texture, Viewport};
use tracing::info;

use super::avatar::{draw_avatar, AvatarLook};
use super::draw::{draw_campus, SceneStyle};
use super::layout::CampusLayout;
use super::movement::{
    step_avatar, step_camera, AvatarState, CameraState, MoveKeys, SimulationState, SCENE_BOUNDS,
};
use super::wireframe::{draw_walkthrough, Projection, WireLayout};

/// Top-down campus map with one keyboard-driven avatar.
pub(crate) struct TopDownScene {
    name: &'static str,
    layout: CampusLayout,
    style: SceneStyle,
    look: AvatarLook,
    avatar: AvatarState,
}

impl TopDownScene {
    pub(crate) fn with_sprite(texture: Texture) -> Self {
        Self::new(
            "top-down sprite",
            AvatarLook::Sprite(texture),
            SceneStyle { labels: false },
        )
    }

    pub(crate) fn with_wedge() -> Self {
        Self::new("top-down wedge", AvatarLook::Wedge, SceneStyle { labels: true })
    }

    fn new(name: &'static str, look: AvatarLook, style: SceneStyle) -> Self {
        let layout = CampusLayout::campus(SCENE_BOUNDS);
        info!(
            scene = name,
            structures = layout.structures().len(),
            labels = style.labels,
            "campus_layout_built"
        );
        Self {
            name,
            layout,
            style,
            look,
            avatar: AvatarState::spawn(),
        }
    }

    #[cfg(test)]
    pub(crate) fn avatar(&self) -> &AvatarState {
        &self.avatar
    }
}

impl Scene for TopDownScene {
    fn name(&self) -> &'static str {
        self.name
    }

    fn update(&mut self, input: &InputSnapshot) {
        self.avatar = step_avatar(self.avatar, MoveKeys::from_input(input), SCENE_BOUNDS);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        draw_campus(renderer, &self.layout, self.style);
        draw_avatar(renderer, &self.look, &self.avatar);
    }

    fn debug_lines(&self) -> Vec<String> {
        vec![
            format!(
                "POS: {:.1},{:.1}",
                self.avatar.position.x, self.avatar.position.y
            ),
            format!("FACING: {}", self.avatar.facing.degrees()),
        ]
    }

    fn debug_state(&self) -> Option<serde_json::Value> {
        serde_json::to_value(SimulationState::TopDown(self.avatar)).ok()
    }
}

/// First-person wireframe walk over the campus ground plane.
pub(crate) struct WalkthroughScene {
    layout: WireLayout,
    projection: Projection,
    camera: CameraState,
}

impl WalkthroughScene {
    pub(crate) fn new() -> Self {
        Self::for_viewport(Viewport {
            width: SCENE_BOUNDS.x as u32,
            height: SCENE_BOUNDS.y as u32,
        })
    }

    fn for_viewport(viewport: Viewport) -> Self {
        let layout = WireLayout::campus();
        let cuboids: Vec<&str> = layout.cuboids.iter().map(|cuboid| cuboid.name).collect();
        info!(scene = "walkthrough", ?cuboids, "wire_layout_built");
        Self {
            layout,
            projection: Projection::for_viewport(viewport),
            camera: CameraState::spawn(),
        }
    }

    #[cfg(test)]
    pub(crate) fn camera(&self) -> &CameraState {
        &self.camera
    }
}

impl Scene for WalkthroughScene {
    fn name(&self) -> &'static str {
        "walkthrough"
    }

    fn update(&mut self, input: &InputSnapshot) {
        self.camera = step_camera(self.camera, MoveKeys::from_input(input));
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        draw_walkthrough(renderer, &self.layout, &self.camera, &self.projection);
    }

    fn debug_lines(&self) -> Vec<String> {
        let p = self.camera.position;
        vec![format!("POS: {:.2},{:.2},{:.2}", p.x, p.y, p.z)]
    }

    fn debug_state(&self) -> Option<serde_json::Value> {
        serde_json::to_value(SimulationState::Walkthrough(self.camera)).ok()
    }
}
