//! Caption description model.

/// Immutable caption spec supplied by callers.
pub mod spec;
