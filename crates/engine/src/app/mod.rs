mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod tools;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    draw_text_extent, load_texture, Canvas, DrawCall, Rect, RecordingRenderer, Renderer, Rgba,
    Texture, TextureError, Viewport,
};
pub use scene::{InputSnapshot, Scene, Vec2};
pub(crate) use tools::OverlayData;
