use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::input::{ActionStates, InputAction};
use super::rendering::Renderer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotates about the origin. With screen coordinates (y down) a positive
    /// angle turns clockwise on screen.
    pub fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    dump_state_pressed: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(dump_state_pressed: bool, actions: ActionStates) -> Self {
        Self {
            dump_state_pressed,
            actions,
        }
    }

    pub fn dump_state_pressed(&self) -> bool {
        self.dump_state_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_dump_state_pressed(mut self, pressed: bool) -> Self {
        self.dump_state_pressed = pressed;
        self
    }
}

/// A running simulation driven one fixed tick at a time by the loop runner.
pub trait Scene {
    fn name(&self) -> &'static str;
    fn update(&mut self, input: &InputSnapshot);
    fn render(&self, renderer: &mut dyn Renderer);
    fn debug_lines(&self) -> Vec<String> {
        Vec::new()
    }
    fn debug_state(&self) -> Option<serde_json::Value> {
        None
    }
}
