//! Timed interpolation of colors, frames and fixture parameters onto an endpoint.

pub mod engine;
/// Named channel values and the 512-channel universe they are written into.
pub mod params;
