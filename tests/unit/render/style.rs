use super::*;
use crate::layout::wrap::{LineBox, TextMeasurer};

/// Shaper that rasterizes each line as a solid opaque box, 8 px per char.
struct BoxShaper;

const ADVANCE: f32 = 8.0;
const LINE_H: f32 = 10.0;

impl TextMeasurer for BoxShaper {
    fn measure_line(&mut self, text: &str, _font: &ResolvedFont) -> CaptionResult<(f32, f32)> {
        Ok((text.chars().count() as f32 * ADVANCE, LINE_H))
    }
}

impl TextShaper for BoxShaper {
    fn raster_line(
        &mut self,
        text: &str,
        _font: &ResolvedFont,
        color: Rgb,
    ) -> CaptionResult<FrameRgba> {
        let w = ((text.chars().count() as f32 * ADVANCE) as u32).max(1);
        let h = LINE_H as u32;
        let mut out = FrameRgba::transparent(w, h);
        for px in out.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
        Ok(out)
    }
}

fn test_font() -> ResolvedFont {
    ResolvedFont::new(vec![0u8; 4], 16.0).unwrap()
}

/// Bounding box of non-white pixels in an opaque canvas.
fn ink_bbox(canvas: &FrameRgba) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let off = canvas.offset(x, y);
            if &canvas.data[off..off + 3] != &[255, 255, 255] {
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bbox
}

fn render(style: TextStyle) -> FrameRgba {
    let mut canvas = FrameRgba::solid(100, 60, Rgb::WHITE);
    StyleRenderer::render_line(
        &mut canvas,
        (20, 20),
        "abc",
        &test_font(),
        Rgb::BLACK,
        style,
        &mut BoxShaper,
    )
    .unwrap();
    canvas
}

#[test]
fn regular_draw_lands_at_position() {
    let canvas = render(TextStyle::REGULAR);
    let (x0, y0, x1, y1) = ink_bbox(&canvas).unwrap();
    assert_eq!((x0, y0), (20, 20));
    assert_eq!((x1, y1), (20 + 23, 20 + 9));
}

#[test]
fn bold_extends_the_box_by_one_pixel() {
    let plain = ink_bbox(&render(TextStyle::REGULAR)).unwrap();
    let bold = ink_bbox(&render(TextStyle::new(true, false))).unwrap();
    assert_eq!(bold.0, plain.0);
    assert_eq!(bold.1, plain.1);
    assert_eq!(bold.2, plain.2 + 1);
    assert_eq!(bold.3, plain.3 + 1);
}

#[test]
fn italic_box_is_wider_than_plain() {
    let plain = ink_bbox(&render(TextStyle::REGULAR)).unwrap();
    let italic = ink_bbox(&render(TextStyle::new(false, true))).unwrap();
    let plain_w = plain.2 - plain.0;
    let italic_w = italic.2 - italic.0;
    assert!(italic_w > plain_w, "italic {italic_w} <= plain {plain_w}");
}

#[test]
fn bold_italic_box_strictly_contains_plain() {
    let plain = ink_bbox(&render(TextStyle::REGULAR)).unwrap();
    let both = ink_bbox(&render(TextStyle::new(true, true))).unwrap();
    let plain_area = (plain.2 - plain.0 + 1) * (plain.3 - plain.1 + 1);
    let both_area = (both.2 - both.0 + 1) * (both.3 - both.1 + 1);
    assert!(both_area > plain_area);
}

#[test]
fn bold_line_advance_gains_the_fixed_delta() {
    let regular = TextStyle::REGULAR.line_advance(10.0);
    let bold = TextStyle::new(true, false).line_advance(10.0);
    assert_eq!(regular, 10.0 * LINE_ADVANCE_FACTOR);
    assert_eq!(bold, regular + BOLD_ADVANCE_DELTA);
}

#[test]
fn block_lines_are_individually_centered() {
    let block = TextBlock {
        lines: vec![
            LineBox {
                text: "aaaa".into(),
                width: 32.0,
            },
            LineBox {
                text: "aa".into(),
                width: 16.0,
            },
        ],
        width: 32.0,
        height: 44,
        line_height: LINE_H,
    };
    let mut canvas = FrameRgba::solid(100, 80, Rgb::WHITE);
    StyleRenderer::render_block(
        &mut canvas,
        (10, 10),
        &block,
        &test_font(),
        Rgb::BLACK,
        TextStyle::REGULAR,
        &mut BoxShaper,
    )
    .unwrap();

    // Second line starts one advance down and is centered inside the block.
    let advance = TextStyle::REGULAR.line_advance(LINE_H).round() as u32;
    let y = 10 + advance;
    let off = canvas.offset(10 + 8, y + 1);
    assert_eq!(&canvas.data[off..off + 3], &[0, 0, 0]);
    let off = canvas.offset(10, y + 1);
    assert_eq!(&canvas.data[off..off + 3], &[255, 255, 255]);
}
