//! Physical panels and the array that tiles them into one canvas.

pub mod array;
/// Mounting corner of a panel's (0, 0) pixel.
pub mod origin;
/// Writes every pushed frame to disk as a PNG.
pub mod png_sink;
/// Byte-level device trait and built-in sinks.
pub mod sink;
