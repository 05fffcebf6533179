use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use tracing::warn;
use winit::window::Window;

use super::Canvas;

/// Presents a [`Canvas`] in a window through `pixels`.
///
/// The pixel buffer keeps the logical scene size; window resizes only rescale
/// the surface.
pub(crate) struct FrameSurface {
    pixels: Pixels<'static>,
    buffer_width: u32,
    buffer_height: u32,
}

impl FrameSurface {
    pub(crate) fn new(window: &'static Window, width: u32, height: u32) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(width, height, surface)?;
        Ok(Self {
            pixels,
            buffer_width: width,
            buffer_height: height,
        })
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub(crate) fn present(&mut self, canvas: &Canvas) -> Result<(), Error> {
        let frame = self.pixels.frame_mut();
        if frame.len() == canvas.frame().len() {
            frame.copy_from_slice(canvas.frame());
        } else {
            warn!(
                buffer_width = self.buffer_width,
                buffer_height = self.buffer_height,
                canvas_bytes = canvas.frame().len(),
                "canvas_size_mismatch_skipping_copy"
            );
        }
        self.pixels.render()
    }
}
