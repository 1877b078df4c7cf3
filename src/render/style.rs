use crate::assets::font::ResolvedFont;
use crate::assets::text::TextShaper;
use crate::foundation::core::{FrameRgba, Rgb};
use crate::foundation::error::CaptionResult;
use crate::layout::wrap::{LINE_ADVANCE_FACTOR, TextBlock};
use crate::render::raster::{premul_over, shear_x_bilinear};

/// Pixel offsets stacked to simulate bold.
pub(crate) const BOLD_OFFSETS: [(u32, u32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
/// Horizontal shear factor applied for italic simulation.
pub(crate) const ITALIC_SHEAR: f32 = 0.2;
/// Staging margin around italic text before the shear.
pub(crate) const ITALIC_MARGIN: u32 = 4;
/// Staging margin for combined bold + italic.
pub(crate) const BOLD_ITALIC_MARGIN: u32 = 6;
/// Extra line advance for bold text so stacked copies do not overlap.
pub(crate) const BOLD_ADVANCE_DELTA: f32 = 2.0;

/// Bold/italic style simulation flags for one caption block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// Stack offset copies for a heavier stroke.
    pub bold: bool,
    /// Shear the rendered line for a slanted look.
    pub italic: bool,
}

impl TextStyle {
    /// Style with both flags clear.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
    };

    /// Create a style from flags.
    pub const fn new(bold: bool, italic: bool) -> Self {
        Self { bold, italic }
    }

    fn staging_margin(self) -> u32 {
        match (self.bold, self.italic) {
            (_, false) => 0,
            (false, true) => ITALIC_MARGIN,
            (true, true) => BOLD_ITALIC_MARGIN,
        }
    }

    /// Vertical distance between consecutive line origins.
    pub(crate) fn line_advance(self, line_height: f32) -> f32 {
        let base = line_height * LINE_ADVANCE_FACTOR;
        if self.bold {
            base + BOLD_ADVANCE_DELTA
        } else {
            base
        }
    }
}

/// Draws measured caption blocks onto a canvas with style simulation.
///
/// All modes are deterministic approximations: bold stacks four draws at
/// one-pixel offsets, italic shears a staging surface and composites it
/// through its alpha channel. No true weight or slant variants are used.
pub struct StyleRenderer;

impl StyleRenderer {
    /// Render `block` onto `target` with its top-left at `origin`.
    ///
    /// Lines are individually centered within the block width.
    pub fn render_block(
        target: &mut FrameRgba,
        origin: (i64, i64),
        block: &TextBlock,
        font: &ResolvedFont,
        color: Rgb,
        style: TextStyle,
        shaper: &mut dyn TextShaper,
    ) -> CaptionResult<()> {
        let advance = style.line_advance(block.line_height);
        for (i, line) in block.lines.iter().enumerate() {
            let x = origin.0 + (((block.width - line.width) / 2.0).round() as i64);
            let y = origin.1 + ((i as f32 * advance).round() as i64);
            Self::render_line(target, (x, y), &line.text, font, color, style, shaper)?;
        }
        Ok(())
    }

    /// Render one line at `position` (top-left of its bounding box).
    pub fn render_line(
        target: &mut FrameRgba,
        position: (i64, i64),
        text: &str,
        font: &ResolvedFont,
        color: Rgb,
        style: TextStyle,
        shaper: &mut dyn TextShaper,
    ) -> CaptionResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let base = shaper.raster_line(text, font, color)?;
        let margin = style.staging_margin();

        let staging = match (style.bold, style.italic) {
            (false, false) => {
                premul_over(target, &base, position.0, position.1);
                return Ok(());
            }
            (true, false) => {
                let mut staging = FrameRgba::transparent(base.width + 1, base.height + 1);
                for (dx, dy) in BOLD_OFFSETS {
                    premul_over(&mut staging, &base, i64::from(dx), i64::from(dy));
                }
                premul_over(target, &staging, position.0, position.1);
                return Ok(());
            }
            (false, true) => {
                let mut staging = FrameRgba::transparent(
                    base.width + 2 * margin,
                    base.height + 2 * margin,
                );
                premul_over(&mut staging, &base, i64::from(margin), i64::from(margin));
                staging
            }
            (true, true) => {
                let mut staging = FrameRgba::transparent(
                    base.width + 1 + 2 * margin,
                    base.height + 1 + 2 * margin,
                );
                for (dx, dy) in BOLD_OFFSETS {
                    premul_over(
                        &mut staging,
                        &base,
                        i64::from(margin + dx),
                        i64::from(margin + dy),
                    );
                }
                staging
            }
        };

        let sheared = shear_x_bilinear(&staging, ITALIC_SHEAR);
        premul_over(
            target,
            &sheared,
            position.0 - i64::from(margin),
            position.1 - i64::from(margin),
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
