use crate::assets::font::ResolvedFont;
use crate::foundation::error::CaptionResult;

/// Vertical padding above a caption block's text.
pub const TOP_PADDING: u32 = 10;
/// Vertical padding below a caption block's text.
pub const BOTTOM_PADDING: u32 = 10;
/// Horizontal slack subtracted from the wrap limit.
pub const WIDTH_PADDING: u32 = 10;
/// Line advance as a multiple of the measured line height.
pub const LINE_ADVANCE_FACTOR: f32 = 1.2;

/// Measures a single line of shaped text.
///
/// Trait seam between wrapping logic and the shaping backend; production
/// code uses [`crate::assets::text::ParleyShaper`], tests use deterministic
/// fixed-advance fakes.
pub trait TextMeasurer {
    /// Measured `(width, height)` in pixels of one line of text.
    fn measure_line(&mut self, text: &str, font: &ResolvedFont) -> CaptionResult<(f32, f32)>;
}

/// One wrapped line and its measured pixel width.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    /// Line text without trailing whitespace.
    pub text: String,
    /// Measured pixel width.
    pub width: f32,
}

/// A wrapped, measured caption block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Wrapped lines in order.
    pub lines: Vec<LineBox>,
    /// Width of the widest line.
    pub width: f32,
    /// Block height in pixels including top and bottom padding; zero for an
    /// empty block.
    pub height: u32,
    /// Measured height of the first line, which drives the line advance.
    pub line_height: f32,
}

impl TextBlock {
    /// The zero-height block produced by empty text.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            width: 0.0,
            height: 0,
            line_height: 0.0,
        }
    }

    /// Return `true` when the block holds no text.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text height without the block paddings.
    pub(crate) fn text_height(&self) -> f32 {
        (self.lines.len() as f32) * self.line_height * LINE_ADVANCE_FACTOR
    }
}

/// Greedily wrap `text` to fit `max_width`.
///
/// Hard breaks split the text first and each segment wraps independently.
/// Words accumulate onto a line while the measured candidate stays below
/// `max_width - WIDTH_PADDING`; a single word that alone exceeds the limit
/// is placed on its own line unsplit.
pub fn wrap(
    text: &str,
    max_width: u32,
    font: &ResolvedFont,
    measurer: &mut dyn TextMeasurer,
) -> CaptionResult<Vec<String>> {
    let limit = max_width.saturating_sub(WIDTH_PADDING) as f32;
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        wrap_segment(segment, limit, font, measurer, &mut lines)?;
    }
    Ok(lines)
}

fn wrap_segment(
    segment: &str,
    limit: f32,
    font: &ResolvedFont,
    measurer: &mut dyn TextMeasurer,
    out: &mut Vec<String>,
) -> CaptionResult<()> {
    let words: Vec<&str> = segment.split(' ').collect();
    let mut i = 0;
    while i < words.len() {
        let mut line = String::new();
        while i < words.len() {
            let candidate = format!("{line}{}", words[i]);
            let (w, _) = measurer.measure_line(&candidate, font)?;
            if w >= limit {
                break;
            }
            line = candidate;
            line.push(' ');
            i += 1;
        }
        if line.is_empty() {
            // A single word wider than the limit stays unsplit on its own line.
            line.push_str(words[i]);
            i += 1;
        }
        out.push(line.trim_end().to_string());
    }
    Ok(())
}

/// Wrap and measure `text` into a renderable caption block.
///
/// Empty text yields the zero-height [`TextBlock::empty`]; callers treat it
/// as "no caption".
pub fn layout_block(
    text: &str,
    max_width: u32,
    font: &ResolvedFont,
    measurer: &mut dyn TextMeasurer,
) -> CaptionResult<TextBlock> {
    if text.is_empty() {
        return Ok(TextBlock::empty());
    }

    let wrapped = wrap(text, max_width, font, measurer)?;
    let mut lines = Vec::with_capacity(wrapped.len());
    let mut block_width = 0.0f32;
    let mut line_height = 0.0f32;
    for (idx, text) in wrapped.into_iter().enumerate() {
        let (w, h) = measurer.measure_line(&text, font)?;
        if idx == 0 {
            line_height = h;
        }
        block_width = block_width.max(w);
        lines.push(LineBox { text, width: w });
    }

    let text_height = (lines.len() as f32) * line_height * LINE_ADVANCE_FACTOR;
    let height = (text_height + (TOP_PADDING + BOTTOM_PADDING) as f32) as u32;
    Ok(TextBlock {
        lines,
        width: block_width,
        height,
        line_height,
    })
}

/// Top-left origin that centers a block of `block_width` in the canvas.
///
/// `y_offset` is zero for the top block and `top_h + frame_h` for a boxed
/// bottom block.
pub fn center_origin(block_width: f32, canvas_width: u32, y_offset: u32) -> (i64, i64) {
    let x = ((canvas_width as f32 - block_width) / 2.0).round() as i64;
    (x, (y_offset + TOP_PADDING) as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
