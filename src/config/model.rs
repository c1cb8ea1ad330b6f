use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::{
    device::origin::Origin,
    foundation::error::{LedError, LedResult},
    frame::encoding::PixelEncoding,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Descriptor of one physical panel.
pub struct DeviceSpec {
    /// Network or serial address; informational for the engine, used by sink factories.
    pub address: String,
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// Corner the panel treats as local `(0, 0)`.
    #[serde(default)]
    pub origin: Origin,
    /// Wire format expected by the panel.
    #[serde(default)]
    pub encoding: PixelEncoding,
}

impl DeviceSpec {
    /// Build a spec with the default RGB row-major encoding.
    pub fn new(address: impl Into<String>, width: u32, height: u32, origin: Origin) -> Self {
        Self {
            address: address.into(),
            width,
            height,
            origin,
            encoding: PixelEncoding::default(),
        }
    }

    /// Replace the wire format.
    pub fn with_encoding(mut self, encoding: PixelEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rectangular tiling of panels: `columns[c][r]` is the device in column `c`, row `r` (top first).
pub struct CanvasConfig {
    /// Device columns from left to right.
    pub columns: Vec<Vec<DeviceSpec>>,
}

impl CanvasConfig {
    /// Check that the tiling is non-empty and rectangular.
    ///
    /// Every column needs the same row count, devices in a column share a width
    /// and devices in a row share a height.
    pub fn validate(&self) -> LedResult<()> {
        let Some(first) = self.columns.first() else {
            return Err(LedError::invalid_argument("canvas needs at least one column"));
        };
        let rows = first.len();
        if rows == 0 {
            return Err(LedError::invalid_argument("canvas column 0 has no devices"));
        }

        for (c, column) in self.columns.iter().enumerate() {
            if column.len() != rows {
                return Err(LedError::invalid_argument(format!(
                    "canvas column {c} has {} devices, expected {rows}",
                    column.len()
                )));
            }
            for (r, dev) in column.iter().enumerate() {
                if dev.width == 0 || dev.height == 0 {
                    return Err(LedError::invalid_argument(format!(
                        "device '{}' at column {c}, row {r} has an empty extent",
                        dev.address
                    )));
                }
                if dev.width != column[0].width {
                    return Err(LedError::invalid_argument(format!(
                        "device '{}' width {} differs from column {c} width {}",
                        dev.address, dev.width, column[0].width
                    )));
                }
                if dev.height != first[r].height {
                    return Err(LedError::invalid_argument(format!(
                        "device '{}' height {} differs from row {r} height {}",
                        dev.address, dev.height, first[r].height
                    )));
                }
            }
        }
        Ok(())
    }

    /// Devices in column-major order; this is the device index used by [`crate::Array`].
    pub fn devices(&self) -> impl Iterator<Item = &DeviceSpec> {
        self.columns.iter().flatten()
    }

    /// Number of devices in the tiling.
    pub fn device_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Pacing defaults for fades and playback.
pub struct PlaybackDefaults {
    /// Tick length of the fade engine.
    #[serde(default = "default_frame_time_ms")]
    pub frame_time_ms: u64,
    /// Hold used by sequences that do not set their own.
    #[serde(default = "default_hold_ms")]
    pub default_hold_ms: u64,
    /// Duration of inter-item transitions.
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: u64,
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            frame_time_ms: default_frame_time_ms(),
            default_hold_ms: default_hold_ms(),
            transition_duration_ms: default_transition_duration_ms(),
        }
    }
}

impl PlaybackDefaults {
    /// Tick length as a [`Duration`].
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_time_ms)
    }

    /// Default hold as a [`Duration`].
    pub fn default_hold(&self) -> Duration {
        Duration::from_millis(self.default_hold_ms)
    }

    /// Transition duration as a [`Duration`].
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

fn default_frame_time_ms() -> u64 {
    40
}

fn default_hold_ms() -> u64 {
    1000
}

fn default_transition_duration_ms() -> u64 {
    2550
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Top-level configuration document.
pub struct AppConfig {
    /// Panel tiling.
    pub canvas: CanvasConfig,
    /// Pacing defaults.
    #[serde(default)]
    pub playback: PlaybackDefaults,
}

impl AppConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> LedResult<Self> {
        let cfg: AppConfig = serde_json::from_str(s)
            .map_err(|e| LedError::invalid_argument(format!("parse configuration JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> LedResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read configuration '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Validate the canvas and reject a zero tick length.
    pub fn validate(&self) -> LedResult<()> {
        self.canvas.validate()?;
        if self.playback.frame_time_ms == 0 {
            return Err(LedError::invalid_argument("playback.frame_time_ms must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
