//! ledwall composes addressable-LED panels into one logical canvas and drives
//! fades, spatial transitions and looped playback onto it.
//!
//! # Overview
//!
//! 1. **Describe** the canvas: columns of [`DeviceSpec`] in a [`CanvasConfig`].
//! 2. **Connect** one [`DeviceSink`] per device and build an [`Array`].
//! 3. **Draw** [`Frame`]s in logical coordinates (top-left origin, y down).
//! 4. **Show** them directly, [`fade`] between them, or loop a [`Sequence`] with a [`Player`].
//!
//! The array splits each frame per device, applies the panel's mounting
//! [`Origin`], encodes the bytes the panel expects and pushes every device in
//! parallel. A device that fails is reported in the [`DeliveryReport`] without
//! stopping its siblings.
#![forbid(unsafe_code)]

mod animation;
mod color;
mod config;
mod device;
mod effects;
mod fade;
mod foundation;
mod frame;
mod playback;

pub use animation::ease::Ease;
pub use color::blend::BlendMode;
pub use color::model::{Color, ColorLayout, Rgb, Rgbw};
pub use config::model::{AppConfig, CanvasConfig, DeviceSpec, PlaybackDefaults};
pub use device::array::{Array, DeliveryReport, DeviceFailure};
pub use device::origin::Origin;
pub use device::png_sink::PngSink;
pub use device::sink::{DeviceSink, InMemorySink};
pub use effects::transitions::{Transition, TransitionDirection, TransitionType};
pub use fade::engine::{
    DEFAULT_FRAME_TIME, Endpoint, FadeOutcome, FadeTiming, Fadeable, Fader, drive, fade,
};
pub use fade::params::{ChannelUniverse, MASTER_DIMMER, Parameter, ParameterSet, UNIVERSE_SIZE};
pub use foundation::error::{LedError, LedResult};
pub use frame::encoding::{ChannelOrder, PixelEncoding, ScanOrder};
pub use frame::grid::Frame;
pub use frame::image_io::{decode_frame, frame_from_rgba, frame_to_rgb_image, load_frame, save_png};
pub use frame::sequence::{Content, Sequence};
pub use playback::player::{ErrorPolicy, LoopCount, PlayOptions, PlayReport, PlayState, Player};
pub use playback::task::{CancelToken, PlaybackHandle};
