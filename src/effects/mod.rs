/// Spatial transitions between two frames.
pub mod transitions;
