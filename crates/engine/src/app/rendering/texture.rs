use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;

use super::Rgba;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to open sprite image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sprite image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("sprite image {path} has zero width or height")]
    Empty { path: PathBuf },
    #[error("rgba buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// RGBA8 pixels, row-major from the top-left texel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Texture {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at `(x, y)`, clamped to the edge.
    pub fn texel(&self, x: u32, y: u32) -> Rgba {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let offset = (y * self.width as usize + x) * 4;
        [
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        ]
    }
}

/// Reads and decodes an image file into an RGBA8 texture.
pub fn load_texture(path: &Path) -> Result<Texture, TextureError> {
    let reader = ImageReader::open(path).map_err(|source| TextureError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }
    let (width, height) = (image.width(), image.height());
    Texture::from_rgba(width, height, image.into_raw())
}
