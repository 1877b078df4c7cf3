//! Frame composition and style-simulated text rendering.

/// Per-frame composition loop for animated sources.
pub mod animate;
/// Single-frame caption composition.
pub mod compose;
/// Raw RGBA8 pixel operations.
pub mod raster;
/// Bold/italic style simulation.
pub mod style;
