//! Session-oriented captioning API.

/// Caption session surface: decode → layout → compose → encode → compress.
pub mod caption;
