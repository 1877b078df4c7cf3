use std::io::Cursor;

use super::*;
use crate::assets::font::resolve_font_bytes;
use crate::scene::spec::CaptionSpec;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([30, 60, 90]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Sessions shape real glyphs; skip when the host has no usable font.
fn host_font_available() -> bool {
    if resolve_font_bytes(None).is_err() {
        eprintln!("skipping: no system font available");
        return false;
    }
    true
}

#[test]
fn zero_budget_is_rejected_before_decoding() {
    let session = CaptionSession::new(CaptionSpec::new("hi")).with_byte_budget(0);
    let err = session.caption_bytes(b"irrelevant").unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn static_png_produces_taller_png_output() {
    if !host_font_available() {
        return;
    }
    let session = CaptionSession::new(CaptionSpec::new("hello world"));
    let out = session.caption_bytes(&png_bytes(500, 500)).unwrap();

    assert_eq!(out.format, OutputFormat::Png);
    assert_eq!(out.format.extension(), "png");
    assert_eq!(out.frames, 1);
    assert_eq!(out.width, 500);
    assert!(out.height > 500);

    let img = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!(img.width(), out.width);
    assert_eq!(img.height(), out.height);
}

#[test]
fn empty_top_text_is_a_layout_error() {
    if !host_font_available() {
        return;
    }
    let session = CaptionSession::new(CaptionSpec::new(""));
    let err = session.caption_bytes(&png_bytes(64, 64)).unwrap_err();
    assert!(err.to_string().contains("layout error:"));
}

#[test]
fn jpeg_sources_default_to_jpeg_output() {
    if !host_font_available() {
        return;
    }
    let img = image::RgbImage::from_pixel(64, 64, image::Rgb([120, 10, 10]));
    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();

    let session = CaptionSession::new(CaptionSpec::new("hi"));
    let out = session.caption_bytes(&jpeg).unwrap();
    assert_eq!(out.format, OutputFormat::Jpeg);
    assert_eq!(out.format.extension(), "jpg");
}
