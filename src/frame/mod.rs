//! Rectangular pixel grids and how they travel to devices.

/// Wire channel order and scan order.
pub mod encoding;
/// The `Frame` grid itself.
pub mod grid;
/// PNG/JPEG import and PNG export.
pub mod image_io;
/// Ordered, nestable frame content.
pub mod sequence;
