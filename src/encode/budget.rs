use crate::assets::decode::decode_source;
use crate::encode::output::{OutputFormat, encode_gif_scaled, encode_jpeg_rgb};
use crate::foundation::error::{CaptionError, CaptionResult};

/// Format family steered through the degradation ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatFamily {
    /// JPEG-like lossy single-frame buffers.
    Jpeg,
    /// PNG buffers; transcoded once to the JPEG family before degrading.
    Png,
    /// GIF sequences degraded by palette size and width.
    Gif,
}

impl FormatFamily {
    fn as_output(self) -> OutputFormat {
        match self {
            Self::Jpeg => OutputFormat::Jpeg,
            Self::Png => OutputFormat::Png,
            Self::Gif => OutputFormat::Gif,
        }
    }
}

/// Bounds and presets for the degradation ladder.
///
/// Quality, shrink factor, width, and color count are all monotonically
/// non-increasing over a ladder run; the floors guarantee termination.
#[derive(Clone, Debug)]
pub struct BudgetOpts {
    /// Descending JPEG quality presets tried before any resizing.
    pub jpeg_qualities: Vec<u8>,
    /// Fixed quality used inside the JPEG resize loop.
    pub jpeg_resize_quality: u8,
    /// Initial dimension shrink factor for the JPEG resize loop.
    pub shrink_start: f32,
    /// Shrink factor decrement per resize iteration.
    pub shrink_step: f32,
    /// Smallest shrink factor attempted before giving up.
    pub shrink_floor: f32,
    /// Largest GIF output width; wider sources are scaled down first.
    pub gif_width_cap: u32,
    /// Width decrement once the palette floor is reached.
    pub gif_width_step: u32,
    /// Smallest GIF width attempted.
    pub gif_width_floor: u32,
    /// Smallest GIF palette size attempted.
    pub gif_color_floor: usize,
}

impl Default for BudgetOpts {
    fn default() -> Self {
        Self {
            jpeg_qualities: vec![85, 55, 30],
            jpeg_resize_quality: 30,
            shrink_start: 0.7,
            shrink_step: 0.1,
            shrink_floor: 0.2,
            gif_width_cap: 800,
            gif_width_step: 100,
            gif_width_floor: 200,
            gif_color_floor: 64,
        }
    }
}

/// Result of a compression pass.
///
/// The compressor never fails on a budget miss; callers compare
/// `bytes.len()` against the requested budget to detect a best-effort
/// outcome. `format` differs from the input family only for PNG inputs,
/// which transcode once to JPEG.
#[derive(Clone, Debug)]
pub struct CompressedOutput {
    /// Final encoded buffer.
    pub bytes: Vec<u8>,
    /// Format of the final buffer.
    pub format: OutputFormat,
}

/// Drive an encoded buffer under `budget` bytes via the format's ladder.
///
/// A buffer already within budget is returned byte-identical. Budget misses
/// at the ladder floors return the best-effort buffer, never an error.
#[tracing::instrument(skip(bytes, opts), fields(len = bytes.len()))]
pub fn compress_to_budget(
    bytes: Vec<u8>,
    family: FormatFamily,
    budget: u64,
    opts: &BudgetOpts,
) -> CaptionResult<CompressedOutput> {
    if budget == 0 {
        return Err(CaptionError::validation("byte budget must be positive"));
    }
    if bytes.len() as u64 <= budget {
        return Ok(CompressedOutput {
            bytes,
            format: family.as_output(),
        });
    }

    match family {
        FormatFamily::Jpeg | FormatFamily::Png => {
            // PNG converts to the JPEG family exactly once, flattening any
            // transparency onto white.
            let img = image::load_from_memory(&bytes)
                .map_err(|e| CaptionError::decode(format!("re-decode for compression: {e}")))?;
            let rgb = flatten_to_rgb(img);
            jpeg_ladder(&rgb, budget, opts)
        }
        FormatFamily::Gif => gif_ladder(&bytes, budget, opts),
    }
}

fn flatten_to_rgb(img: image::DynamicImage) -> image::RgbImage {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut out = image::RgbImage::new(w, h);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let a = u16::from(src[3]);
        for c in 0..3 {
            let fg = u16::from(src[c]);
            dst[c] = ((fg * a + 255 * (255 - a) + 127) / 255) as u8;
        }
    }
    out
}

fn jpeg_ladder(
    img: &image::RgbImage,
    budget: u64,
    opts: &BudgetOpts,
) -> CaptionResult<CompressedOutput> {
    let mut best = None;
    for &quality in &opts.jpeg_qualities {
        let buf = encode_jpeg_rgb(img, quality)?;
        tracing::debug!(quality, len = buf.len(), "jpeg quality preset");
        if buf.len() as u64 <= budget {
            return Ok(CompressedOutput {
                bytes: buf,
                format: OutputFormat::Jpeg,
            });
        }
        best = Some(buf);
    }

    let (w0, h0) = img.dimensions();
    let mut factor = opts.shrink_start;
    loop {
        let w = (((w0 as f32) * factor) as u32).max(1);
        let h = (((h0 as f32) * factor) as u32).max(1);
        let scaled = image::imageops::resize(img, w, h, image::imageops::FilterType::Triangle);
        let buf = encode_jpeg_rgb(&scaled, opts.jpeg_resize_quality)?;
        tracing::debug!(factor, w, h, len = buf.len(), "jpeg resize step");
        if buf.len() as u64 <= budget {
            return Ok(CompressedOutput {
                bytes: buf,
                format: OutputFormat::Jpeg,
            });
        }
        best = Some(buf);
        if factor <= opts.shrink_floor + f32::EPSILON {
            break;
        }
        factor = (factor - opts.shrink_step).max(opts.shrink_floor);
    }

    // Floor reached without meeting budget: best-effort, not an error.
    Ok(CompressedOutput {
        bytes: best.unwrap_or_default(),
        format: OutputFormat::Jpeg,
    })
}

fn gif_ladder(bytes: &[u8], budget: u64, opts: &BudgetOpts) -> CaptionResult<CompressedOutput> {
    let source = decode_source(bytes)?;
    let mut width = source.width.min(opts.gif_width_cap);
    let mut colors = 256usize;
    let mut best = None;

    loop {
        let buf = encode_gif_scaled(&source.frames, width, colors)?;
        tracing::debug!(width, colors, len = buf.len(), "gif ladder step");
        if buf.len() as u64 <= budget {
            return Ok(CompressedOutput {
                bytes: buf,
                format: OutputFormat::Gif,
            });
        }
        best = Some(buf);

        // Prefer dropping colors to the floor before narrowing the frames.
        if colors / 2 >= opts.gif_color_floor {
            colors /= 2;
        } else if width > opts.gif_width_floor {
            width = width
                .saturating_sub(opts.gif_width_step)
                .max(opts.gif_width_floor);
        } else {
            break;
        }
    }

    // Both floors reached without meeting budget: best-effort, not an error.
    Ok(CompressedOutput {
        bytes: best.unwrap_or_default(),
        format: OutputFormat::Gif,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/budget.rs"]
mod tests;
