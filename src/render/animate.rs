use crate::assets::decode::TimedFrame;
use crate::assets::font::ResolvedFont;
use crate::assets::text::TextShaper;
use crate::foundation::error::CaptionResult;
use crate::render::compose::{CaptionLayouts, compose};
use crate::scene::spec::CaptionSpec;

/// Composite the caption onto every frame of an animated source.
///
/// Frames are processed serially in order; each composition owns its canvas
/// (there is no shared current-frame state to restore), so an error on any
/// frame aborts the whole sequence with nothing partial left behind.
/// Durations pass through unchanged — reassembly as an infinitely-looping,
/// full-replace sequence happens at encode time.
pub fn caption_frames(
    frames: &[TimedFrame],
    spec: &CaptionSpec,
    layouts: &CaptionLayouts,
    font: &ResolvedFont,
    shaper: &mut dyn TextShaper,
) -> CaptionResult<Vec<TimedFrame>> {
    let mut out = Vec::with_capacity(frames.len());
    for frame in frames {
        let canvas = compose(&frame.image, spec, layouts, font, shaper)?;
        out.push(TimedFrame {
            image: canvas,
            delay_ms: frame.delay_ms,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/animate.rs"]
mod tests;
