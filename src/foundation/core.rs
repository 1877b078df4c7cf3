use crate::foundation::error::{CaptionError, CaptionResult};

/// Solid RGB color triplet used for text, fills, and separator lines.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color from `R,G,B` or `R G B` notation.
    pub fn parse(s: &str) -> CaptionResult<Self> {
        let parts: Vec<&str> = if s.contains(',') {
            s.split(',').map(str::trim).collect()
        } else {
            s.split_whitespace().collect()
        };
        if parts.len() != 3 {
            return Err(CaptionError::validation(format!(
                "invalid color '{s}': expected R,G,B or R G B"
            )));
        }
        let chan = |p: &str| -> CaptionResult<u8> {
            p.parse::<u8>().map_err(|_| {
                CaptionError::validation(format!("invalid color channel '{p}' in '{s}'"))
            })
        };
        Ok(Self::new(chan(parts[0])?, chan(parts[1])?, chan(parts[2])?))
    }
}

/// Owned RGBA8 pixel buffer in row-major order.
///
/// Canvases and decoded source frames are opaque (alpha 255 everywhere);
/// text staging surfaces carry premultiplied alpha until composited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Allocate a buffer filled with an opaque solid color.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        let px = [color.r, color.g, color.b, 255];
        let n = (width as usize) * (height as usize);
        let mut data = vec![0u8; n * 4];
        for chunk in data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Allocate a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wrap a decoded `image` buffer without copying.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert into an `image` RGBA buffer for encoding or resizing.
    pub fn into_rgba_image(self) -> CaptionResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| CaptionError::encode("frame byte length does not match dimensions"))
    }

    /// Copy out an `image` RGB buffer, dropping alpha (frame must be opaque).
    pub fn to_rgb_image(&self) -> CaptionResult<image::RgbImage> {
        let mut rgb = Vec::with_capacity((self.width as usize) * (self.height as usize) * 3);
        for px in self.data.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .ok_or_else(|| CaptionError::encode("frame byte length does not match dimensions"))
    }

    /// Byte offset of pixel `(x, y)`.
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
