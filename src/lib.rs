//! Memely composites caption text onto still and animated raster images.
//!
//! The public API is session-oriented:
//!
//! - Describe the caption with a [`CaptionSpec`]
//! - Create a [`CaptionSession`] (font, output format, optional byte budget)
//! - Feed it encoded source bytes and receive a [`CaptionOutput`] buffer
//!
//! The lower layers (layout, style rendering, composition, encoding, and the
//! size-budget compression ladder) are public for callers that need finer
//! control than the session surface.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Source decoding, font resolution, and text shaping.
pub mod assets;
/// Output encoding and the size-budget compression ladder.
pub mod encode;
/// Caption text wrapping and block measurement.
pub mod layout;
/// Frame composition and style-simulated text rendering.
pub mod render;
/// Caption description model.
pub mod scene;
/// Session-oriented captioning API.
pub mod session;

pub use crate::foundation::core::{FrameRgba, Rgb};
pub use crate::foundation::error::{CaptionError, CaptionResult};

pub use crate::encode::budget::{BudgetOpts, CompressedOutput, FormatFamily, compress_to_budget};
pub use crate::encode::output::OutputFormat;
pub use crate::scene::spec::{BottomMode, CaptionSpec};
pub use crate::session::caption::{CaptionOutput, CaptionSession};
