//! Background playback: cancellation primitives and the looping player.

pub mod player;
/// Cancel tokens and joinable worker threads.
pub mod task;
