use crate::assets::font::ResolvedFont;
use crate::assets::text::TextShaper;
use crate::foundation::core::{FrameRgba, Rgb};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::layout::wrap::{BOTTOM_PADDING, TOP_PADDING, TextBlock, center_origin, layout_block};
use crate::render::raster::{blit, fill_rect};
use crate::render::style::{StyleRenderer, TextStyle};
use crate::scene::spec::{BottomMode, CaptionSpec};

/// Separator line thickness in pixels.
pub(crate) const SEPARATOR_THICKNESS: u32 = 2;
/// Advisory ceiling for the boxed bottom block as a fraction of frame height.
pub(crate) const MAX_BOTTOM_RATIO: f32 = 0.334;

/// Wrapped caption blocks computed once per request and reused per frame.
#[derive(Clone, Debug)]
pub struct CaptionLayouts {
    /// Top caption block; never empty for a valid request.
    pub top: TextBlock,
    /// Bottom caption block when bottom text is present and non-empty.
    pub bottom: Option<TextBlock>,
}

impl CaptionLayouts {
    /// Canvas height contributed by the boxed bottom block.
    pub(crate) fn bottom_box_height(&self, spec: &CaptionSpec) -> u32 {
        match (&self.bottom, spec.bottom_mode) {
            (Some(block), BottomMode::Boxed) => block.height,
            _ => 0,
        }
    }
}

/// Wrap both caption texts against the source width.
///
/// The top text must be non-empty; empty bottom text is treated as absent.
pub fn layout_caption(
    spec: &CaptionSpec,
    width: u32,
    font: &ResolvedFont,
    measurer: &mut dyn crate::layout::wrap::TextMeasurer,
) -> CaptionResult<CaptionLayouts> {
    if spec.top_text.trim().is_empty() {
        return Err(CaptionError::layout("top caption text is empty"));
    }
    let top = layout_block(&spec.top_text, width, font, measurer)?;
    let bottom = match spec.bottom_text() {
        Some(text) => {
            let block = layout_block(text, width, font, measurer)?;
            (!block.is_empty()).then_some(block)
        }
        None => None,
    };
    Ok(CaptionLayouts { top, bottom })
}

/// Assemble one captioned output frame.
///
/// The canvas is `frame.width` wide and `top_h + frame_h (+ bottom_h when
/// boxed)` tall, white-filled, with the source pasted at `y = top_h`.
pub fn compose(
    frame: &FrameRgba,
    spec: &CaptionSpec,
    layouts: &CaptionLayouts,
    font: &ResolvedFont,
    shaper: &mut dyn TextShaper,
) -> CaptionResult<FrameRgba> {
    let width = frame.width;
    let top_h = layouts.top.height;
    let bottom_h = layouts.bottom_box_height(spec);
    let total_h = top_h + frame.height + bottom_h;
    let style = TextStyle::new(spec.bold, spec.italic);

    let mut canvas = FrameRgba::solid(width, total_h, Rgb::WHITE);
    blit(&mut canvas, frame, 0, i64::from(top_h));

    if let Some(bg) = spec.top_background {
        fill_rect(&mut canvas, 0, 0, width, top_h, bg);
    }
    if let Some(color) = spec.separator
        && top_h > 0
    {
        fill_rect(
            &mut canvas,
            0,
            top_h.saturating_sub(1),
            width,
            SEPARATOR_THICKNESS,
            color,
        );
    }

    let top_origin = center_origin(layouts.top.width, width, 0);
    StyleRenderer::render_block(
        &mut canvas,
        top_origin,
        &layouts.top,
        font,
        spec.top_font_color,
        style,
        shaper,
    )?;

    if let Some(block) = &layouts.bottom {
        match spec.bottom_mode {
            BottomMode::Boxed => {
                let box_y = top_h + frame.height;
                if let Some(bg) = spec.bottom_background {
                    fill_rect(&mut canvas, 0, box_y, width, bottom_h, bg);
                }
                if let Some(color) = spec.separator {
                    fill_rect(&mut canvas, 0, box_y, width, SEPARATOR_THICKNESS, color);
                }
                advise_bottom_ratio(block, frame.height);
                let origin = center_origin(block.width, width, box_y);
                StyleRenderer::render_block(
                    &mut canvas,
                    origin,
                    block,
                    font,
                    spec.bottom_font_color,
                    style,
                    shaper,
                )?;
            }
            BottomMode::Overlay => {
                // Overlay origin is frame-relative, clamped so tall blocks
                // stay on the frame, then offset by the top block.
                let y = (frame.height as f32) - block.text_height() - (BOTTOM_PADDING as f32);
                let y = (y.round() as i64).max(i64::from(TOP_PADDING));
                let x = ((width as f32 - block.width) / 2.0).round() as i64;
                StyleRenderer::render_block(
                    &mut canvas,
                    (x, y + i64::from(top_h)),
                    block,
                    font,
                    spec.bottom_font_color,
                    style,
                    shaper,
                )?;
            }
        }
    }

    Ok(canvas)
}

fn advise_bottom_ratio(block: &TextBlock, frame_height: u32) {
    let max_allowed = (frame_height as f32) * MAX_BOTTOM_RATIO;
    if (block.height as f32) > max_allowed {
        tracing::debug!(
            block_height = block.height,
            frame_height,
            "bottom caption block exceeds advisory height ratio"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
