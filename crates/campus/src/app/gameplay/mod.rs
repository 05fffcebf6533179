mod avatar;
mod draw;
mod layout;
mod movement;
mod scenes;
mod wireframe;

pub(crate) use scenes::{TopDownScene, WalkthroughScene};
