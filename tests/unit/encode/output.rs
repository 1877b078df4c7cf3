use super::*;

use crate::foundation::core::{FrameRgba, Rgb};

fn gradient_frame(w: u32, h: u32) -> FrameRgba {
    let mut f = FrameRgba::transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            let off = f.offset(x, y);
            f.data[off] = (x * 255 / w.max(1)) as u8;
            f.data[off + 1] = (y * 255 / h.max(1)) as u8;
            f.data[off + 2] = ((x + y) % 256) as u8;
            f.data[off + 3] = 255;
        }
    }
    f
}

#[test]
fn png_round_trips_dimensions_and_pixels() {
    let frame = FrameRgba::solid(5, 3, Rgb::new(10, 20, 30));
    let bytes = encode_png(&frame).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (5, 3));
    assert_eq!(img.get_pixel(4, 2).0, [10, 20, 30]);
}

#[test]
fn lower_jpeg_quality_shrinks_the_buffer() {
    let frame = gradient_frame(128, 128);
    let high = encode_jpeg(&frame, 85).unwrap();
    let low = encode_jpeg(&frame, 30).unwrap();
    assert!(low.len() < high.len());
    assert!(image::load_from_memory(&low).is_ok());
}

#[test]
fn gif_sequence_loops_forever_with_frame_palettes() {
    let frames = vec![
        TimedFrame {
            image: FrameRgba::solid(8, 8, Rgb::new(255, 0, 0)),
            delay_ms: 100,
        },
        TimedFrame {
            image: FrameRgba::solid(8, 8, Rgb::new(0, 0, 255)),
            delay_ms: 200,
        },
    ];
    let bytes = encode_gif(&frames, 256).unwrap();

    // Netscape application extension marks the infinite loop.
    assert!(
        bytes
            .windows(b"NETSCAPE2.0".len())
            .any(|w| w == b"NETSCAPE2.0")
    );

    let decoded = crate::assets::decode::decode_source(&bytes).unwrap();
    assert_eq!(decoded.frames.len(), 2);
    assert_eq!(decoded.frames[0].delay_ms, 100);
    assert_eq!(decoded.frames[1].delay_ms, 200);
}

#[test]
fn scaled_gif_preserves_aspect_ratio() {
    let frames = vec![TimedFrame {
        image: gradient_frame(200, 100),
        delay_ms: 100,
    }];
    let bytes = encode_gif_scaled(&frames, 100, 128).unwrap();
    let decoded = crate::assets::decode::decode_source(&bytes).unwrap();
    assert_eq!((decoded.width, decoded.height), (100, 50));
}

#[test]
fn empty_sequences_are_rejected() {
    assert!(encode_gif(&[], 256).is_err());
}
