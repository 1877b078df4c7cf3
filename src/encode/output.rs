use std::borrow::Cow;
use std::io::Cursor;

use image::ImageEncoder as _;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

use crate::assets::decode::TimedFrame;
use crate::foundation::core::FrameRgba;
use crate::foundation::error::{CaptionError, CaptionResult};

/// JPEG quality used for single-pass (unbudgeted) encodes.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;
/// Palette size used for unbudgeted GIF encodes.
pub const GIF_MAX_COLORS: usize = 256;
/// NeuQuant sampling factor (1 = best quality, 30 = fastest).
const GIF_SAMPLE_FAC: i32 = 10;

/// Output format family of an encoded buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG.
    Png,
    /// Lossy JPEG.
    Jpeg,
    /// GIF (static or animated).
    Gif,
}

impl OutputFormat {
    /// File extension conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
        }
    }
}

/// Encode an opaque frame as PNG.
pub fn encode_png(frame: &FrameRgba) -> CaptionResult<Vec<u8>> {
    let rgb = frame.to_rgb_image()?;
    let mut out = Vec::new();
    PngEncoder::new(Cursor::new(&mut out))
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CaptionError::encode(format!("png encode: {e}")))?;
    Ok(out)
}

/// Encode an opaque frame as JPEG at the given quality.
pub fn encode_jpeg(frame: &FrameRgba, quality: u8) -> CaptionResult<Vec<u8>> {
    encode_jpeg_rgb(&frame.to_rgb_image()?, quality)
}

/// Encode an RGB buffer as JPEG at the given quality.
pub(crate) fn encode_jpeg_rgb(img: &image::RgbImage, quality: u8) -> CaptionResult<Vec<u8>> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut out), quality)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CaptionError::encode(format!("jpeg encode (quality {quality}): {e}")))?;
    Ok(out)
}

/// Encode a frame sequence as an infinitely-looping GIF.
///
/// Every frame is quantized to its own adaptive palette of at most
/// `max_colors` entries and written with full-frame-replace disposal and its
/// original duration.
pub fn encode_gif(frames: &[TimedFrame], max_colors: usize) -> CaptionResult<Vec<u8>> {
    let Some(first) = frames.first() else {
        return Err(CaptionError::encode("gif encode: no frames"));
    };
    encode_gif_scaled(frames, first.image.width, max_colors)
}

/// Encode a frame sequence as GIF, first resizing every frame to `width`
/// (aspect-preserving, bilinear).
pub(crate) fn encode_gif_scaled(
    frames: &[TimedFrame],
    width: u32,
    max_colors: usize,
) -> CaptionResult<Vec<u8>> {
    let Some(first) = frames.first() else {
        return Err(CaptionError::encode("gif encode: no frames"));
    };
    let (src_w, src_h) = (first.image.width, first.image.height);
    if src_w == 0 || src_h == 0 {
        return Err(CaptionError::encode("gif encode: zero-sized frames"));
    }
    let width = width.min(src_w).max(1);
    let height = (((src_h as u64) * (width as u64)) / (src_w as u64)).max(1) as u32;

    let w16: u16 = width
        .try_into()
        .map_err(|_| CaptionError::encode("gif width exceeds u16"))?;
    let h16: u16 = height
        .try_into()
        .map_err(|_| CaptionError::encode("gif height exceeds u16"))?;

    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(Cursor::new(&mut out), w16, h16, &[])
            .map_err(|e| CaptionError::encode(format!("gif encoder init: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| CaptionError::encode(format!("gif repeat: {e}")))?;

        for frame in frames {
            let rgba = if width == frame.image.width && height == frame.image.height {
                frame.image.data.clone()
            } else {
                let img = frame.image.clone().into_rgba_image()?;
                image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle)
                    .into_raw()
            };

            let quant = color_quant::NeuQuant::new(GIF_SAMPLE_FAC, max_colors, &rgba);
            let palette = quant.color_map_rgb();
            let mut indices = Vec::with_capacity((width as usize) * (height as usize));
            for px in rgba.chunks_exact(4) {
                indices.push(quant.index_of(px) as u8);
            }

            let mut gf = gif::Frame::<'_>::default();
            gf.width = w16;
            gf.height = h16;
            gf.buffer = Cow::Owned(indices);
            gf.palette = Some(palette);
            gf.delay = ((frame.delay_ms + 5) / 10).min(u32::from(u16::MAX)) as u16;
            gf.dispose = gif::DisposalMethod::Background;
            encoder
                .write_frame(&gf)
                .map_err(|e| CaptionError::encode(format!("gif frame encode: {e}")))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
