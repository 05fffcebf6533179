use glam::Vec3;
use map_engine::{InputAction, InputSnapshot, Vec2};
use serde::Serialize;

pub(crate) const SCENE_BOUNDS: Vec2 = Vec2::new(800.0, 600.0);
pub(crate) const AVATAR_SPEED_PX_PER_TICK: f32 = 4.0;
pub(crate) const AVATAR_HALF_SIZE_PX: f32 = 24.0;
pub(crate) const CAMERA_SPEED_UNITS_PER_TICK: f32 = 0.2;

/// Movement keys held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MoveKeys {
    pub(crate) forward: bool,
    pub(crate) back: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl MoveKeys {
    pub(crate) fn from_input(input: &InputSnapshot) -> Self {
        Self {
            forward: input.is_down(InputAction::MoveForward),
            back: input.is_down(InputAction::MoveBack),
            left: input.is_down(InputAction::MoveLeft),
            right: input.is_down(InputAction::MoveRight),
        }
    }
}

/// Cardinal facing, in degrees clockwise from screen-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u16")]
pub(crate) enum Facing {
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    pub(crate) fn degrees(self) -> u16 {
        match self {
            Facing::Up => 0,
            Facing::Right => 90,
            Facing::Down => 180,
            Facing::Left => 270,
        }
    }

    pub(crate) fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }
}

impl From<Facing> for u16 {
    fn from(facing: Facing) -> Self {
        facing.degrees()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct AvatarState {
    pub(crate) position: Vec2,
    pub(crate) facing: Facing,
    pub(crate) speed: f32,
    pub(crate) half_size: f32,
}

impl AvatarState {
    pub(crate) fn spawn() -> Self {
        Self::at(Vec2::new(SCENE_BOUNDS.x * 0.5, SCENE_BOUNDS.y * 0.5), Facing::Up)
    }

    pub(crate) fn at(position: Vec2, facing: Facing) -> Self {
        Self {
            position,
            facing,
            speed: AVATAR_SPEED_PX_PER_TICK,
            half_size: AVATAR_HALF_SIZE_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct CameraState {
    pub(crate) position: Vec3,
    pub(crate) forward: Vec3,
    pub(crate) up: Vec3,
    pub(crate) speed: f32,
}

impl CameraState {
    pub(crate) fn spawn() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 10.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            speed: CAMERA_SPEED_UNITS_PER_TICK,
        }
    }

    /// Unit vector to the camera's right, `normalize(forward x up)`.
    pub(crate) fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    /// Point the camera looks at: one unit ahead, level with the eye.
    pub(crate) fn look_target(&self) -> Vec3 {
        self.position + Vec3::new(self.forward.x, 0.0, self.forward.z)
    }
}

/// Snapshot of whatever the running scene simulates, as dumped with F2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub(crate) enum SimulationState {
    TopDown(AvatarState),
    Walkthrough(CameraState),
}

/// Advances the avatar one tick.
///
/// Keys are applied forward, back, left, right; each pressed key adds one
/// step of displacement and the last one applied sets the facing. The result
/// is clamped so the footprint stays inside `bounds`.
pub(crate) fn step_avatar(state: AvatarState, keys: MoveKeys, bounds: Vec2) -> AvatarState {
    let mut delta = Vec2::ZERO;
    let mut facing = state.facing;

    if keys.forward {
        delta.y -= state.speed;
        facing = Facing::Up;
    }
    if keys.back {
        delta.y += state.speed;
        facing = Facing::Down;
    }
    if keys.left {
        delta.x -= state.speed;
        facing = Facing::Left;
    }
    if keys.right {
        delta.x += state.speed;
        facing = Facing::Right;
    }

    let moved = state.position + delta;
    AvatarState {
        position: Vec2::new(
            clamp_axis(moved.x, state.half_size, bounds.x),
            clamp_axis(moved.y, state.half_size, bounds.y),
        ),
        facing,
        ..state
    }
}

/// Advances the walkthrough camera one tick on the ground plane. No bounds.
pub(crate) fn step_camera(state: CameraState, keys: MoveKeys) -> CameraState {
    let right = state.right();
    let mut position = state.position;

    if keys.forward {
        position.x += state.forward.x * state.speed;
        position.z += state.forward.z * state.speed;
    }
    if keys.back {
        position.x -= state.forward.x * state.speed;
        position.z -= state.forward.z * state.speed;
    }
    if keys.left {
        position.x -= right.x * state.speed;
        position.z -= right.z * state.speed;
    }
    if keys.right {
        position.x += right.x * state.speed;
        position.z += right.z * state.speed;
    }

    CameraState { position, ..state }
}

fn clamp_axis(value: f32, half_size: f32, dimension: f32) -> f32 {
    value.max(half_size).min(dimension - half_size)
}
