use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    color::model::{Color, ColorLayout},
    config::model::{CanvasConfig, DeviceSpec},
    device::sink::DeviceSink,
    foundation::error::{LedError, LedResult},
    frame::grid::Frame,
};

struct Slot {
    spec: DeviceSpec,
    offset_x: u32,
    offset_y: u32,
    sink: Mutex<Box<dyn DeviceSink>>,
    realtime: AtomicBool,
}

impl Slot {
    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.offset_x
            && y >= self.offset_y
            && x - self.offset_x < self.spec.width
            && y - self.offset_y < self.spec.height
    }

    fn sample(&self, frame: &Frame) -> Frame {
        let (w, h) = (self.spec.width, self.spec.height);
        let mut local = Frame::black(w, h, frame.layout());
        for ly in 0..h {
            for lx in 0..w {
                let (x, y) = self.spec.origin.to_logical(lx, ly, w, h);
                let c = frame.get((x + self.offset_x) as i32, (y + self.offset_y) as i32);
                local.set(lx as i32, ly as i32, c);
            }
        }
        local
    }

    fn deliver(&self, bytes: &[u8]) -> LedResult<()> {
        let mut sink = self.sink.lock().map_err(|_| {
            LedError::endpoint_unavailable(format!(
                "sink for '{}' is poisoned by an earlier panic",
                self.spec.address
            ))
        })?;
        if !self.realtime.load(Ordering::Acquire) {
            sink.set_realtime_mode()?;
            self.realtime.store(true, Ordering::Release);
        }
        sink.push_frame(bytes)
    }
}

/// A device that did not receive its frame.
#[derive(Debug)]
pub struct DeviceFailure {
    /// Column-major device index.
    pub index: usize,
    pub address: String,
    pub error: LedError,
}

/// Outcome of one delivery across every device of an [`Array`].
#[derive(Debug)]
pub struct DeliveryReport {
    pub total: usize,
    pub failures: Vec<DeviceFailure>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn delivered(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.index).collect()
    }

    /// Collapse into a [`LedError::Delivery`] when any device failed.
    pub fn into_result(self) -> LedResult<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(LedError::Delivery {
                failed: self.failures.len(),
                total: self.total,
            })
        }
    }
}

/// A logical canvas tiled out of independently addressed panels.
///
/// The array owns placement metadata and one sink per device, never pixel
/// data. Devices are indexed column-major, matching [`CanvasConfig::devices`].
/// Each sink sits behind its own lock, so concurrent writers interleave per
/// device and the last write wins.
pub struct Array {
    slots: Vec<Slot>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array")
            .field("width", &self.width)
            .field("height", &self.height)
            .field(
                "devices",
                &self.slots.iter().map(|s| &s.spec.address).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Array {
    /// Build an array from a canvas description, asking `connect` for one sink per device.
    pub fn new(
        canvas: &CanvasConfig,
        mut connect: impl FnMut(&DeviceSpec) -> LedResult<Box<dyn DeviceSink>>,
    ) -> LedResult<Self> {
        let columns = canvas
            .columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|spec| Ok((spec.clone(), connect(spec)?)))
                    .collect::<LedResult<Vec<_>>>()
            })
            .collect::<LedResult<Vec<_>>>()?;
        Self::from_columns(columns)
    }

    /// Build an array from columns of `(spec, sink)` pairs, left to right, top to bottom.
    pub fn from_columns(columns: Vec<Vec<(DeviceSpec, Box<dyn DeviceSink>)>>) -> LedResult<Self> {
        let canvas = CanvasConfig {
            columns: columns
                .iter()
                .map(|c| c.iter().map(|(spec, _)| spec.clone()).collect())
                .collect(),
        };
        canvas.validate()?;

        let row_heights: Vec<u32> = canvas.columns[0].iter().map(|d| d.height).collect();
        let mut slots = Vec::with_capacity(canvas.device_count());
        let mut offset_x = 0u32;
        for column in columns {
            let column_width = column[0].0.width;
            let mut offset_y = 0u32;
            for ((spec, sink), row_height) in column.into_iter().zip(&row_heights) {
                slots.push(Slot {
                    spec,
                    offset_x,
                    offset_y,
                    sink: Mutex::new(sink),
                    realtime: AtomicBool::new(false),
                });
                offset_y += row_height;
            }
            offset_x += column_width;
        }

        Ok(Self {
            slots,
            width: offset_x,
            height: row_heights.iter().sum(),
        })
    }

    /// An array made of one device.
    pub fn single(spec: DeviceSpec, sink: Box<dyn DeviceSink>) -> LedResult<Self> {
        Self::from_columns(vec![vec![(spec, sink)]])
    }

    /// Sum of column widths.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Sum of row heights.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn device_count(&self) -> usize {
        self.slots.len()
    }

    pub fn device(&self, index: usize) -> Option<&DeviceSpec> {
        self.slots.get(index).map(|s| &s.spec)
    }

    /// Map a logical coordinate to `(device index, local x, local y)`.
    pub fn locate(&self, x: u32, y: u32) -> Option<(usize, u32, u32)> {
        let (index, slot) = self
            .slots
            .iter()
            .enumerate()
            .find(|(_, s)| s.contains(x, y))?;
        let (lx, ly) = slot.spec.origin.to_local(
            x - slot.offset_x,
            y - slot.offset_y,
            slot.spec.width,
            slot.spec.height,
        );
        Some((index, lx, ly))
    }

    /// The device-local frame that device `index` would receive for `frame`.
    pub fn device_frame(&self, frame: &Frame, index: usize) -> LedResult<Frame> {
        let slot = self.slots.get(index).ok_or_else(|| {
            LedError::invalid_argument(format!(
                "device index {index} out of range for {} device(s)",
                self.slots.len()
            ))
        })?;
        Ok(slot.sample(frame))
    }

    /// A black frame covering the whole canvas.
    pub fn blank_frame(&self, layout: ColorLayout) -> Frame {
        Frame::black(self.width, self.height, layout)
    }

    /// Compose `frame` onto every device and push it.
    ///
    /// Devices are written in parallel and independently; a failing device is
    /// recorded in the report and does not stop delivery to its siblings. A
    /// frame whose extent differs from the canvas is rejected up front.
    #[tracing::instrument(skip(self, frame), fields(devices = self.slots.len()))]
    pub fn show_realtime_frame(&self, frame: &Frame) -> LedResult<DeliveryReport> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(LedError::invalid_argument(format!(
                "frame {}x{} does not match canvas {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }

        let results: Vec<(usize, LedResult<()>)> = self
            .slots
            .par_iter()
            .enumerate()
            .map(|(index, slot)| {
                let bytes = slot.sample(frame).to_bytes(&slot.spec.encoding);
                (index, slot.deliver(&bytes))
            })
            .collect();

        Ok(self.report(results))
    }

    /// Fill the whole canvas with one color and push it.
    pub fn show_color(&self, color: Color) -> LedResult<DeliveryReport> {
        self.show_realtime_frame(&Frame::new(self.width, self.height, color))
    }

    /// Put every device into streaming mode now instead of on first push.
    pub fn enter_realtime(&self) -> DeliveryReport {
        let results = self
            .slots
            .par_iter()
            .enumerate()
            .map(|(index, slot)| {
                let res = slot
                    .sink
                    .lock()
                    .map_err(|_| LedError::endpoint_unavailable("sink lock poisoned"))
                    .and_then(|mut sink| sink.set_realtime_mode());
                if res.is_ok() {
                    slot.realtime.store(true, Ordering::Release);
                }
                (index, res)
            })
            .collect();
        self.report(results)
    }

    fn report(&self, results: Vec<(usize, LedResult<()>)>) -> DeliveryReport {
        let total = results.len();
        let failures = results
            .into_iter()
            .filter_map(|(index, res)| res.err().map(|error| (index, error)))
            .map(|(index, error)| {
                let address = self.slots[index].spec.address.clone();
                tracing::warn!(index, %address, %error, "device delivery failed");
                DeviceFailure {
                    index,
                    address,
                    error,
                }
            })
            .collect();
        DeliveryReport { total, failures }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/array.rs"]
mod tests;
