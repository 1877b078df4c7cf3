//! Source decoding, font resolution, and text shaping.

/// Source image decoding (static and animated).
pub mod decode;
/// Resolved font value, auto sizing, and fallback probing.
pub mod font;
/// Parley/vello text shaper behind the [`crate::assets::text::TextShaper`] seam.
pub mod text;
