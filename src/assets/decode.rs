use std::io::Cursor;

use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

use crate::foundation::core::{FrameRgba, Rgb};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::raster::flatten_alpha;

/// Display duration assumed when a frame declares none.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Source format family of the decoded input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// JPEG input.
    Jpeg,
    /// PNG input.
    Png,
    /// GIF input (static or animated).
    Gif,
}

/// One decoded frame with its display duration.
#[derive(Clone, Debug)]
pub struct TimedFrame {
    /// Solid (alpha-flattened) RGBA8 pixels.
    pub image: FrameRgba,
    /// Display duration in milliseconds.
    pub delay_ms: u32,
}

/// Decoded source image, normalized to solid RGBA8 frames.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Format family of the encoded input.
    pub format: SourceFormat,
    /// Ordered frames; exactly one for static sources.
    pub frames: Vec<TimedFrame>,
}

impl SourceImage {
    /// Return `true` when the source is a multi-frame animation.
    pub fn is_animated(&self) -> bool {
        self.format == SourceFormat::Gif && self.frames.len() > 1
    }
}

/// Decode encoded source bytes into normalized solid RGBA8 frames.
///
/// Transparency is flattened onto white at decode time so every downstream
/// stage works on opaque pixels. Animated GIF frames keep their declared
/// durations; absent or zero durations default to
/// [`DEFAULT_FRAME_DELAY_MS`].
pub fn decode_source(bytes: &[u8]) -> CaptionResult<SourceImage> {
    let format = image::guess_format(bytes)
        .map_err(|e| CaptionError::decode(format!("unrecognized image data: {e}")))?;
    match format {
        image::ImageFormat::Gif => decode_gif(bytes),
        image::ImageFormat::Png => decode_static(bytes, SourceFormat::Png),
        image::ImageFormat::Jpeg => decode_static(bytes, SourceFormat::Jpeg),
        other => Err(CaptionError::decode(format!(
            "unsupported source format {other:?} (expected JPEG, PNG, or GIF)"
        ))),
    }
}

fn decode_static(bytes: &[u8], format: SourceFormat) -> CaptionResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CaptionError::decode(format!("decode image from memory: {e}")))?;
    let mut frame = FrameRgba::from_rgba_image(dyn_img.to_rgba8());
    flatten_alpha(&mut frame, Rgb::WHITE);
    let (width, height) = (frame.width, frame.height);
    if width == 0 || height == 0 {
        return Err(CaptionError::decode("source image has zero dimensions"));
    }
    Ok(SourceImage {
        width,
        height,
        format,
        frames: vec![TimedFrame {
            image: frame,
            delay_ms: DEFAULT_FRAME_DELAY_MS,
        }],
    })
}

fn decode_gif(bytes: &[u8]) -> CaptionResult<SourceImage> {
    let decoder = GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| CaptionError::decode(format!("decode gif header: {e}")))?;
    let raw_frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| CaptionError::decode(format!("decode gif frames: {e}")))?;
    if raw_frames.is_empty() {
        return Err(CaptionError::decode("gif contains no frames"));
    }

    let mut frames = Vec::with_capacity(raw_frames.len());
    for raw in raw_frames {
        let (numer, denom) = raw.delay().numer_denom_ms();
        let delay_ms = if denom == 0 { 0 } else { numer / denom };
        let delay_ms = if delay_ms == 0 {
            DEFAULT_FRAME_DELAY_MS
        } else {
            delay_ms
        };
        let mut image = FrameRgba::from_rgba_image(raw.into_buffer());
        flatten_alpha(&mut image, Rgb::WHITE);
        frames.push(TimedFrame { image, delay_ms });
    }

    let (width, height) = (frames[0].image.width, frames[0].image.height);
    if width == 0 || height == 0 {
        return Err(CaptionError::decode("gif has zero dimensions"));
    }
    if frames
        .iter()
        .any(|f| f.image.width != width || f.image.height != height)
    {
        return Err(CaptionError::decode("gif frames disagree on dimensions"));
    }

    Ok(SourceImage {
        width,
        height,
        format: SourceFormat::Gif,
        frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
