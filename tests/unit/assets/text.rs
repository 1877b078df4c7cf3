use super::*;

#[test]
fn garbage_font_bytes_fail_registration() {
    let mut shaper = ParleyShaper::new();
    let font = ResolvedFont::new(vec![0xde, 0xad, 0xbe, 0xef], 16.0).unwrap();
    assert!(shaper.measure_line("hi", &font).is_err());
}

#[test]
fn brush_default_is_transparent_black() {
    assert_eq!(TextBrushRgba8::default(), TextBrushRgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0
    });
}
