use std::path::Path;

use anyhow::Context;

use crate::color::model::{Color, ColorLayout};
use crate::foundation::error::LedResult;
use crate::frame::grid::Frame;

/// Decode encoded image bytes into a frame.
///
/// Alpha is composited over black since LEDs have no transparency.
pub fn decode_frame(bytes: &[u8], layout: ColorLayout) -> LedResult<Frame> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    Ok(frame_from_rgba(&rgba, layout))
}

/// Read and decode an image file.
pub fn load_frame(path: &Path, layout: ColorLayout) -> LedResult<Frame> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_frame(&bytes, layout)
}

pub fn frame_from_rgba(img: &image::RgbaImage, layout: ColorLayout) -> Frame {
    let (width, height) = img.dimensions();
    let mut frame = Frame::black(width, height, layout);
    for (x, y, px) in img.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let a = u16::from(a);
        let over_black = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
        frame.set(
            x as i32,
            y as i32,
            Color::rgb(over_black(r), over_black(g), over_black(b)),
        );
    }
    frame
}

/// Render a frame as an RGB image; white is folded back into the chromatic channels.
pub fn frame_to_rgb_image(frame: &Frame) -> image::RgbImage {
    image::RgbImage::from_fn(frame.width(), frame.height(), |x, y| {
        image::Rgb(frame.get(x as i32, y as i32).to_rgb().to_array())
    })
}

pub fn save_png(frame: &Frame, path: &Path) -> LedResult<()> {
    frame_to_rgb_image(frame)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/frame/image_io.rs"]
mod tests;
