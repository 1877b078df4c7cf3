use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{CaptionError, CaptionResult};

/// Smallest automatic caption font size in pixels.
pub const MIN_FONT_SIZE: f32 = 13.0;
/// Height/width ratio past which the automatic size is reduced.
pub(crate) const TALL_ASPECT_THRESHOLD: f32 = 1.666;
/// Divisor applied to the automatic size for very tall sources.
pub(crate) const TALL_SIZE_DIVISOR: f32 = 1.5;

/// Well-known system font locations probed when no caller font resolves.
const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Resolved font bytes plus the pixel size captions render at.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    data: Arc<Vec<u8>>,
    size_px: f32,
}

impl ResolvedFont {
    /// Create a resolved font from raw font-file bytes and a pixel size.
    pub fn new(data: Vec<u8>, size_px: f32) -> CaptionResult<Self> {
        if data.is_empty() {
            return Err(CaptionError::validation("font bytes must be non-empty"));
        }
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CaptionError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            size_px,
        })
    }

    /// Borrow the shared font bytes.
    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.data
    }

    /// Pixel size captions render at.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Return a copy of this font at a different pixel size.
    pub fn with_size(&self, size_px: f32) -> CaptionResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CaptionError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        Ok(Self {
            data: Arc::clone(&self.data),
            size_px,
        })
    }
}

/// Compute the automatic caption font size for a source of the given size.
///
/// `max(floor(height / 13), 13)`, reduced by 1.5 for very tall sources so
/// the caption does not dominate the frame.
pub fn auto_font_size(width: u32, height: u32) -> f32 {
    let size = ((height as f32) / 13.0).floor().max(MIN_FONT_SIZE);
    if width > 0 && (height as f32) / (width as f32) >= TALL_ASPECT_THRESHOLD {
        (size / TALL_SIZE_DIVISOR).floor()
    } else {
        size
    }
}

/// Resolve usable font bytes from an optional caller-provided buffer.
///
/// Falls back to probing well-known system font paths as the default glyph
/// source when the caller provides none.
pub fn resolve_font_bytes(explicit: Option<Vec<u8>>) -> CaptionResult<Vec<u8>> {
    if let Some(bytes) = explicit {
        if !bytes.is_empty() {
            return Ok(bytes);
        }
    }
    for path in FALLBACK_FONT_PATHS {
        if let Ok(bytes) = std::fs::read(Path::new(path))
            && !bytes.is_empty()
        {
            return Ok(bytes);
        }
    }
    Err(CaptionError::validation(
        "no usable font: none provided and no known system font found",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
