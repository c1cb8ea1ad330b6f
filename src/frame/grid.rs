use std::time::Duration;

use crate::color::blend::BlendMode;
use crate::color::model::{Color, ColorLayout};
use crate::foundation::error::{LedError, LedResult};
use crate::frame::encoding::{ChannelOrder, PixelEncoding, ScanOrder};

/// A dense `width x height` grid of colors with a top-left origin.
///
/// Every cell shares the frame's [`ColorLayout`]; colors written with a
/// different layout are converted on the way in. Coordinates are signed so
/// callers can position sprites partially off-canvas; out-of-range reads
/// return black and out-of-range writes are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    layout: ColorLayout,
    cells: Vec<Color>,
    hold: Option<Duration>,
}

impl Frame {
    /// Allocate a frame with every cell set to `fill`; the layout follows `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            layout: fill.layout(),
            cells: vec![fill; width as usize * height as usize],
            hold: None,
        }
    }

    pub fn black(width: u32, height: u32, layout: ColorLayout) -> Self {
        Self::new(width, height, Color::black(layout))
    }

    /// Build a frame from row-major cells.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Color>) -> LedResult<Self> {
        if cells.len() != width as usize * height as usize {
            return Err(LedError::invalid_argument(format!(
                "frame {width}x{height} needs {} cells, got {}",
                width as usize * height as usize,
                cells.len()
            )));
        }
        let layout = cells.first().map_or(ColorLayout::Rgb, Color::layout);
        let cells = cells.into_iter().map(|c| c.to_layout(layout)).collect();
        Ok(Self {
            width,
            height,
            layout,
            cells,
            hold: None,
        })
    }

    /// Attach a hold duration that overrides the enclosing sequence's default.
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ColorLayout {
        self.layout
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Color {
        self.index(x, y)
            .map_or(Color::black(self.layout), |i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color.to_layout(self.layout);
        }
    }

    /// Flood the whole frame with `color`.
    pub fn fill(&mut self, color: Color) {
        let color = color.to_layout(self.layout);
        self.cells.fill(color);
    }

    /// Fill a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let color = color.to_layout(self.layout);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width)) as i32;
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height)) as i32;
        for yy in y0..y1 {
            for xx in x0..x1 {
                if let Some(i) = self.index(xx, yy) {
                    self.cells[i] = color;
                }
            }
        }
    }

    /// Bresenham line between two inclusive endpoints.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Copy a `width x height` window starting at `(x, y)`; cells outside this frame read as black.
    pub fn sub_frame(&self, x: i32, y: i32, width: u32, height: u32) -> Frame {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for j in 0..height as i32 {
            for i in 0..width as i32 {
                cells.push(self.get(x.saturating_add(i), y.saturating_add(j)));
            }
        }
        Frame {
            width,
            height,
            layout: self.layout,
            cells,
            hold: None,
        }
    }

    /// Stamp `source` with its top-left corner at `(at_x, at_y)`.
    ///
    /// Source cells that land outside this frame are dropped.
    pub fn replace_sub_frame(
        &mut self,
        source: &Frame,
        at_x: i32,
        at_y: i32,
        mode: BlendMode,
    ) -> LedResult<()> {
        self.ensure_layout(source)?;
        for sy in 0..source.height as i32 {
            for sx in 0..source.width as i32 {
                let Some(i) = self.index(at_x.saturating_add(sx), at_y.saturating_add(sy)) else {
                    continue;
                };
                let src = source.get(sx, sy);
                self.cells[i] = self.cells[i].blend(&src, mode)?;
            }
        }
        Ok(())
    }

    /// Cell-wise [`Color::fade`]. Both frames must share extent and layout.
    pub fn fade(&self, other: &Frame, factor: f64) -> LedResult<Frame> {
        self.zip_cells(other, |a, b| a.fade(b, factor))
    }

    /// Cell-wise [`Color::mix`].
    pub fn mix(&self, other: &Frame, factor: f64, mode: BlendMode) -> LedResult<Frame> {
        self.zip_cells(other, |a, b| a.mix(b, factor, mode))
    }

    pub fn to_layout(&self, layout: ColorLayout) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            layout,
            cells: self.cells.iter().map(|c| c.to_layout(layout)).collect(),
            hold: self.hold,
        }
    }

    /// Check that `other` can be combined cell by cell with `self`.
    pub fn ensure_compatible(&self, other: &Frame) -> LedResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(LedError::invalid_argument(format!(
                "frame extents differ: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        self.ensure_layout(other)
    }

    fn ensure_layout(&self, other: &Frame) -> LedResult<()> {
        if self.layout != other.layout {
            return Err(LedError::invalid_argument(format!(
                "frame layouts differ: {:?} vs {:?}",
                self.layout, other.layout
            )));
        }
        Ok(())
    }

    fn zip_cells(
        &self,
        other: &Frame,
        f: impl Fn(&Color, &Color) -> LedResult<Color>,
    ) -> LedResult<Frame> {
        self.ensure_compatible(other)?;
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| f(a, b))
            .collect::<LedResult<Vec<_>>>()?;
        Ok(Frame {
            width: self.width,
            height: self.height,
            layout: self.layout,
            cells,
            hold: self.hold,
        })
    }

    /// Serialize for a device sink.
    pub fn to_bytes(&self, encoding: &PixelEncoding) -> Vec<u8> {
        let mut out = Vec::with_capacity(encoding.frame_len(self.width, self.height));
        let mut emit = |c: &Color| match encoding.channels {
            ChannelOrder::Rgb => out.extend_from_slice(&c.to_rgb().to_array()),
            ChannelOrder::Wrgb => {
                let [r, g, b, w] = c.to_rgbw().to_array();
                out.extend_from_slice(&[w, r, g, b]);
            }
        };
        match encoding.scan {
            ScanOrder::RowMajor => self.cells.iter().for_each(&mut emit),
            ScanOrder::ColumnMajor => {
                let w = self.width as usize;
                for x in 0..w {
                    for y in 0..self.height as usize {
                        emit(&self.cells[y * w + x]);
                    }
                }
            }
        }
        out
    }

    /// Inverse of [`Frame::to_bytes`].
    pub fn from_bytes(
        width: u32,
        height: u32,
        encoding: &PixelEncoding,
        bytes: &[u8],
    ) -> LedResult<Frame> {
        let expected = encoding.frame_len(width, height);
        if bytes.len() != expected {
            return Err(LedError::invalid_argument(format!(
                "expected {expected} bytes for a {width}x{height} frame, got {}",
                bytes.len()
            )));
        }
        let bpp = encoding.channels.bytes_per_pixel();
        let mut frame = Frame::black(width, height, encoding.channels.layout());
        for (n, px) in bytes.chunks_exact(bpp).enumerate() {
            let color = match encoding.channels {
                ChannelOrder::Rgb => Color::rgb(px[0], px[1], px[2]),
                ChannelOrder::Wrgb => Color::rgbw(px[1], px[2], px[3], px[0]),
            };
            let (x, y) = match encoding.scan {
                ScanOrder::RowMajor => (n % width as usize, n / width as usize),
                ScanOrder::ColumnMajor => (n / height as usize, n % height as usize),
            };
            frame.set(x as i32, y as i32, color);
        }
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/grid.rs"]
mod tests;
