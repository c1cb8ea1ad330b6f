//! Color values and the channel-wise blend modes that combine them.

/// Per-channel combine rules.
pub mod blend;
/// RGB/RGBW values, hex parsing and interpolation.
pub mod model;
