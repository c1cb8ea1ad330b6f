use std::sync::{Mutex, PoisonError};

use crate::{
    device::sink::DeviceSink,
    fade::engine::{Endpoint, Fadeable},
    foundation::error::{LedError, LedResult},
    foundation::math::{lerp_channel, round_channel},
};

/// Channels in one lighting-control universe.
pub const UNIVERSE_SIZE: usize = 512;

/// Name of the parameter that acts as the fixture's overall gain.
pub const MASTER_DIMMER: &str = "MasterDimmer";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: u8,
}

/// Named channel values of one fixture, starting at a 1-based base channel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSet {
    pub base_channel: u16,
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new(base_channel: u16) -> Self {
        Self {
            base_channel,
            parameters: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: u8) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            value,
        });
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Returns `false` when no parameter has that name.
    pub fn set(&mut self, name: &str, value: u8) -> bool {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.value = value;
                true
            }
            None => false,
        }
    }

    /// Master dimmer as a fraction; 1.0 for fixtures without one.
    pub fn gain(&self) -> f64 {
        self.get(MASTER_DIMMER)
            .map_or(1.0, |v| f64::from(v) / 255.0)
    }

    pub fn set_gain(&mut self, gain: f64) {
        self.set(MASTER_DIMMER, round_channel(255.0 * gain));
    }

    /// Channel values in declaration order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.parameters.iter().map(|p| p.value).collect()
    }
}

impl Fadeable for ParameterSet {
    fn ensure_compatible(&self, other: &Self) -> LedResult<()> {
        if self.base_channel != other.base_channel {
            return Err(LedError::invalid_argument(format!(
                "cannot fade parameters at channel {} into channel {}",
                self.base_channel, other.base_channel
            )));
        }
        let names = |s: &ParameterSet| {
            s.parameters
                .iter()
                .map(|p| p.name.clone())
                .collect::<Vec<_>>()
        };
        if names(self) != names(other) {
            return Err(LedError::invalid_argument(format!(
                "parameter names differ: {:?} vs {:?}",
                names(self),
                names(other)
            )));
        }
        Ok(())
    }

    fn interpolate(&self, other: &Self, factor: f64) -> LedResult<Self> {
        self.ensure_compatible(other)?;
        let parameters = self
            .parameters
            .iter()
            .zip(&other.parameters)
            .map(|(a, b)| Parameter {
                name: a.name.clone(),
                value: lerp_channel(a.value, b.value, factor),
            })
            .collect();
        Ok(Self {
            base_channel: self.base_channel,
            parameters,
        })
    }
}

/// A 512-channel buffer pushed as a whole through a device sink.
pub struct ChannelUniverse {
    channels: Mutex<[u8; UNIVERSE_SIZE]>,
    sink: Mutex<(Box<dyn DeviceSink>, bool)>,
}

impl ChannelUniverse {
    pub fn new(sink: Box<dyn DeviceSink>) -> Self {
        Self {
            channels: Mutex::new([0; UNIVERSE_SIZE]),
            sink: Mutex::new((sink, false)),
        }
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec()
    }

    /// Copy `set` into the buffer at its base channel without pushing.
    pub fn stage(&self, set: &ParameterSet) -> LedResult<()> {
        let bytes = set.to_bytes();
        let start = usize::from(set.base_channel);
        if start == 0 || start - 1 + bytes.len() > UNIVERSE_SIZE {
            return Err(LedError::invalid_argument(format!(
                "{} channel(s) at base channel {start} do not fit a {UNIVERSE_SIZE}-channel universe",
                bytes.len()
            )));
        }
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels[start - 1..start - 1 + bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }

    /// Push the whole buffer, entering streaming mode on first use.
    pub fn flush(&self) -> LedResult<()> {
        let frame = self.snapshot();
        let mut guard = self
            .sink
            .lock()
            .map_err(|_| LedError::endpoint_unavailable("universe sink lock poisoned"))?;
        let (sink, realtime) = &mut *guard;
        if !*realtime {
            sink.set_realtime_mode()?;
            *realtime = true;
        }
        sink.push_frame(&frame)
    }
}

impl Endpoint<ParameterSet> for ChannelUniverse {
    fn write(&self, value: &ParameterSet) -> LedResult<()> {
        self.stage(value)?;
        self.flush()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fade/params.rs"]
mod tests;
