//! Output encoding and the size-budget compression ladder.

/// Degradation ladder driving an encoded buffer under a byte budget.
pub mod budget;
/// PNG/JPEG/GIF encoders for composed frames.
pub mod output;
