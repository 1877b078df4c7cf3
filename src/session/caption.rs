use crate::assets::decode::{SourceFormat, decode_source};
use crate::assets::font::{ResolvedFont, auto_font_size, resolve_font_bytes};
use crate::assets::text::ParleyShaper;
use crate::encode::budget::{BudgetOpts, FormatFamily, compress_to_budget};
use crate::encode::output::{
    DEFAULT_JPEG_QUALITY, GIF_MAX_COLORS, OutputFormat, encode_gif, encode_jpeg, encode_png,
};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::render::animate::caption_frames;
use crate::render::compose::{compose, layout_caption};
use crate::scene::spec::CaptionSpec;

/// Finished captioning result.
#[derive(Clone, Debug)]
pub struct CaptionOutput {
    /// Encoded output buffer.
    pub bytes: Vec<u8>,
    /// Format of `bytes`; `format.extension()` names the file suffix.
    pub format: OutputFormat,
    /// Composed canvas width (before any budget-driven resizing).
    pub width: u32,
    /// Composed canvas height (before any budget-driven resizing).
    pub height: u32,
    /// Number of output frames (1 for static sources).
    pub frames: usize,
}

/// Session for captioning one or more sources with a fixed configuration.
///
/// A session owns no per-request state; independent requests may run on
/// separate sessions in separate threads with zero coordination.
#[derive(Clone, Debug)]
pub struct CaptionSession {
    spec: CaptionSpec,
    font_bytes: Option<Vec<u8>>,
    font_size: Option<f32>,
    format: Option<OutputFormat>,
    budget: Option<u64>,
    budget_opts: BudgetOpts,
}

impl CaptionSession {
    /// Create a session for the given caption description.
    pub fn new(spec: CaptionSpec) -> Self {
        Self {
            spec,
            font_bytes: None,
            font_size: None,
            format: None,
            budget: None,
            budget_opts: BudgetOpts::default(),
        }
    }

    /// Use the given font-file bytes instead of the system fallback.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.font_bytes = Some(bytes);
        self
    }

    /// Override the automatic caption font size.
    pub fn with_font_size(mut self, size_px: f32) -> Self {
        self.font_size = Some(size_px);
        self
    }

    /// Prefer an output format for static sources (animated GIF always
    /// emits GIF).
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Compress the encoded output down to at most `budget` bytes (§ ladder
    /// floors permitting; compare the output size to detect a best-effort
    /// miss).
    pub fn with_byte_budget(mut self, budget: u64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Override the compression ladder bounds.
    pub fn with_budget_opts(mut self, opts: BudgetOpts) -> Self {
        self.budget_opts = opts;
        self
    }

    /// Caption encoded source bytes and return the encoded output.
    #[tracing::instrument(skip(self, source_bytes), fields(len = source_bytes.len()))]
    pub fn caption_bytes(&self, source_bytes: &[u8]) -> CaptionResult<CaptionOutput> {
        if self.budget == Some(0) {
            return Err(CaptionError::validation("byte budget must be positive"));
        }

        let source = decode_source(source_bytes)?;

        let size = match self.font_size {
            Some(size) => size,
            None => auto_font_size(source.width, source.height),
        };
        let font_bytes = resolve_font_bytes(self.font_bytes.clone())?;
        let mut font = ResolvedFont::new(font_bytes, size)?;
        let mut shaper = ParleyShaper::new();

        let layouts = match layout_caption(&self.spec, source.width, &font, &mut shaper) {
            Ok(layouts) => layouts,
            Err(CaptionError::Validation(msg)) if self.font_bytes.is_some() => {
                // Caller bytes did not register as a font: retry on the
                // system fallback glyph source.
                tracing::debug!(%msg, "provided font unusable, falling back");
                font = ResolvedFont::new(resolve_font_bytes(None)?, size)?;
                shaper = ParleyShaper::new();
                layout_caption(&self.spec, source.width, &font, &mut shaper)?
            }
            Err(e) => return Err(e),
        };

        let (bytes, format, width, height, frames) = if source.is_animated() {
            let frames = caption_frames(&source.frames, &self.spec, &layouts, &font, &mut shaper)?;
            let (w, h) = (frames[0].image.width, frames[0].image.height);
            let bytes = encode_gif(&frames, GIF_MAX_COLORS)?;
            (bytes, OutputFormat::Gif, w, h, frames.len())
        } else {
            let canvas = compose(&source.frames[0].image, &self.spec, &layouts, &font, &mut shaper)?;
            let format = self.format.unwrap_or(match source.format {
                SourceFormat::Jpeg => OutputFormat::Jpeg,
                _ => OutputFormat::Png,
            });
            let bytes = match format {
                OutputFormat::Png => encode_png(&canvas)?,
                OutputFormat::Jpeg => encode_jpeg(&canvas, DEFAULT_JPEG_QUALITY)?,
                OutputFormat::Gif => {
                    let frame = crate::assets::decode::TimedFrame {
                        image: canvas.clone(),
                        delay_ms: crate::assets::decode::DEFAULT_FRAME_DELAY_MS,
                    };
                    encode_gif(std::slice::from_ref(&frame), GIF_MAX_COLORS)?
                }
            };
            (bytes, format, canvas.width, canvas.height, 1)
        };

        let (bytes, format) = match self.budget {
            Some(budget) => {
                let family = match format {
                    OutputFormat::Png => FormatFamily::Png,
                    OutputFormat::Jpeg => FormatFamily::Jpeg,
                    OutputFormat::Gif => FormatFamily::Gif,
                };
                let out = compress_to_budget(bytes, family, budget, &self.budget_opts)?;
                (out.bytes, out.format)
            }
            None => (bytes, format),
        };

        Ok(CaptionOutput {
            bytes,
            format,
            width,
            height,
            frames,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/caption.rs"]
mod tests;
