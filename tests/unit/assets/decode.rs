use std::io::Cursor;

use super::*;

fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn static_png_decodes_to_one_opaque_frame() {
    let src = decode_source(&png_bytes([10, 20, 30, 255])).unwrap();
    assert_eq!(src.format, SourceFormat::Png);
    assert_eq!((src.width, src.height), (2, 2));
    assert_eq!(src.frames.len(), 1);
    assert!(!src.is_animated());
    assert_eq!(src.frames[0].delay_ms, DEFAULT_FRAME_DELAY_MS);
    assert_eq!(&src.frames[0].image.data[..4], &[10, 20, 30, 255]);
}

#[test]
fn transparency_is_flattened_onto_white() {
    let src = decode_source(&png_bytes([0, 0, 0, 0])).unwrap();
    assert_eq!(&src.frames[0].image.data[..4], &[255, 255, 255, 255]);
}

#[test]
fn animated_gif_keeps_frame_delays() {
    let frames: Vec<TimedFrame> = [(Rgb::new(255, 0, 0), 100), (Rgb::new(0, 255, 0), 250)]
        .into_iter()
        .map(|(color, delay_ms)| TimedFrame {
            image: FrameRgba::solid(4, 4, color),
            delay_ms,
        })
        .collect();
    let bytes = crate::encode::output::encode_gif(&frames, 256).unwrap();

    let src = decode_source(&bytes).unwrap();
    assert_eq!(src.format, SourceFormat::Gif);
    assert!(src.is_animated());
    assert_eq!(src.frames.len(), 2);
    assert_eq!(src.frames[0].delay_ms, 100);
    assert_eq!(src.frames[1].delay_ms, 250);
}

#[test]
fn zero_delay_defaults_to_100ms() {
    let frames = [TimedFrame {
        image: FrameRgba::solid(4, 4, Rgb::BLACK),
        delay_ms: 0,
    }];
    let bytes = crate::encode::output::encode_gif(&frames, 256).unwrap();
    let src = decode_source(&bytes).unwrap();
    assert_eq!(src.frames[0].delay_ms, DEFAULT_FRAME_DELAY_MS);
}

#[test]
fn unsupported_formats_are_rejected() {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Bmp)
        .unwrap();
    let err = decode_source(&buf).unwrap_err();
    assert!(err.to_string().contains("decode error:"));

    assert!(decode_source(b"not an image").is_err());
}
