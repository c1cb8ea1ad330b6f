use crate::color::model::ColorLayout;

/// Bytes emitted per pixel, in wire order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    /// 3 bytes: R, G, B.
    #[default]
    Rgb,
    /// 4 bytes: W, R, G, B.
    Wrgb,
}

impl ChannelOrder {
    pub fn bytes_per_pixel(self) -> usize {
        self.layout().channels()
    }

    /// Color layout a frame is converted to before serialization.
    pub fn layout(self) -> ColorLayout {
        match self {
            Self::Rgb => ColorLayout::Rgb,
            Self::Wrgb => ColorLayout::Rgbw,
        }
    }
}

/// Order in which device-local pixels are streamed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// Wire format of one device sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelEncoding {
    #[serde(default)]
    pub channels: ChannelOrder,
    #[serde(default)]
    pub scan: ScanOrder,
}

impl PixelEncoding {
    pub const RGB_ROW_MAJOR: PixelEncoding = PixelEncoding {
        channels: ChannelOrder::Rgb,
        scan: ScanOrder::RowMajor,
    };

    pub fn frame_len(&self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.channels.bytes_per_pixel()
    }
}
