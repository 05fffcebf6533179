mod canvas;
mod recording;
mod renderer;
mod surface;
mod text;
mod texture;

pub use canvas::Canvas;
pub use recording::{DrawCall, RecordingRenderer};
pub use renderer::{Rect, Renderer, Rgba, Viewport};
pub(crate) use surface::FrameSurface;
pub use text::draw_text_extent;
pub use texture::{load_texture, Texture, TextureError};
