use std::sync::Arc;

use crate::assets::font::ResolvedFont;
use crate::foundation::core::{FrameRgba, Rgb};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::layout::wrap::TextMeasurer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Shapes and rasterizes single caption lines.
///
/// The seam exists so layout and composition logic can be exercised with
/// deterministic fakes; the production implementation is [`ParleyShaper`].
pub trait TextShaper: TextMeasurer {
    /// Rasterize one line into a transparent staging surface.
    ///
    /// The returned buffer carries premultiplied alpha and is sized to the
    /// measured bounding box of the line.
    fn raster_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        color: Rgb,
    ) -> CaptionResult<FrameRgba>;
}

struct CachedFont {
    key: Arc<Vec<u8>>,
    family: String,
    font_data: vello_cpu::peniko::FontData,
}

/// Production shaper backed by Parley shaping and `vello_cpu` rasterization.
pub struct ParleyShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    cached: Option<CachedFont>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Default for ParleyShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyShaper {
    /// Construct a shaper with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            cached: None,
            ctx: None,
        }
    }

    /// Register `font` with Parley (cached per font byte buffer).
    fn ensure_font(&mut self, font: &ResolvedFont) -> CaptionResult<()> {
        if let Some(cached) = &self.cached
            && Arc::ptr_eq(&cached.key, font.data())
        {
            return Ok(());
        }

        let bytes = font.data().as_ref().clone();
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CaptionError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CaptionError::validation("registered font family has no name"))?
            .to_string();

        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        self.cached = Some(CachedFont {
            key: Arc::clone(font.data()),
            family,
            font_data,
        });
        Ok(())
    }

    /// Shape one line of text into a Parley layout.
    fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        brush: TextBrushRgba8,
    ) -> CaptionResult<parley::Layout<TextBrushRgba8>> {
        self.ensure_font(font)?;
        let family = self
            .cached
            .as_ref()
            .map(|c| c.family.clone())
            .unwrap_or_default();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px()));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> CaptionResult<R>,
    ) -> CaptionResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl TextMeasurer for ParleyShaper {
    fn measure_line(&mut self, text: &str, font: &ResolvedFont) -> CaptionResult<(f32, f32)> {
        let layout = self.layout_line(text, font, TextBrushRgba8::default())?;
        Ok((layout.full_width(), layout.height()))
    }
}

impl TextShaper for ParleyShaper {
    fn raster_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        color: Rgb,
    ) -> CaptionResult<FrameRgba> {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        };
        let layout = self.layout_line(text, font, brush)?;

        let width = (layout.full_width().ceil() as u32).max(1);
        let height = (layout.height().ceil() as u32).max(1);
        let w: u16 = width
            .try_into()
            .map_err(|_| CaptionError::layout("staging surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| CaptionError::layout("staging surface height exceeds u16"))?;

        let font_data = self
            .cached
            .as_ref()
            .map(|c| c.font_data.clone())
            .ok_or_else(|| CaptionError::validation("shaper font not prepared"))?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |_, ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font_data)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRgba {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
