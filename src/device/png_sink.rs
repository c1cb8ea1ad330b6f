use std::path::PathBuf;

use crate::device::sink::DeviceSink;
use crate::foundation::error::{LedError, LedResult};
use crate::frame::encoding::PixelEncoding;
use crate::frame::grid::Frame;
use crate::frame::image_io::save_png;

/// Writes every pushed frame as a numbered PNG, for previews without hardware.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    next_index: u64,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32, encoding: PixelEncoding) -> Self {
        Self {
            dir: dir.into(),
            width,
            height,
            encoding,
            next_index: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.next_index
    }
}

impl DeviceSink for PngSink {
    fn set_realtime_mode(&mut self) -> LedResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            LedError::endpoint_unavailable(format!(
                "create output dir '{}': {e}",
                self.dir.display()
            ))
        })
    }

    fn push_frame(&mut self, bytes: &[u8]) -> LedResult<()> {
        let frame = Frame::from_bytes(self.width, self.height, &self.encoding, bytes)?;
        let path = self.dir.join(format!("frame-{:05}.png", self.next_index));
        save_png(&frame, &path)
            .map_err(|e| LedError::endpoint_unavailable(format!("{e:#}")))?;
        self.next_index += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/png_sink.rs"]
mod tests;
