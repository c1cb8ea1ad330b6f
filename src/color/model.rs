use std::{fmt, str::FromStr};

use crate::color::blend::BlendMode;
use crate::foundation::error::{LedError, LedResult};
use crate::foundation::math::{lerp_channel, scale_channel};

/// Channel layout of a [`Color`] and therefore of every cell in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorLayout {
    /// Three chromatic channels.
    Rgb,
    /// Three chromatic channels plus a dedicated white LED.
    Rgbw,
}

impl ColorLayout {
    /// Number of channels carried by this layout.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgbw => 4,
        }
    }
}

/// Three-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Move the common component of the chromatic channels into white.
    pub fn to_rgbw(self) -> Rgbw {
        let w = self.r.min(self.g).min(self.b);
        Rgbw {
            r: self.r - w,
            g: self.g - w,
            b: self.b - w,
            w,
        }
    }
}

/// Four-channel color with a dedicated white component.
///
/// Construction through [`Rgbw::new`] keeps one normal form: when no white is
/// supplied, white light hidden in the chromatic channels is moved to `w`.
/// This is what makes `#ffffff00` and `#000000ff` the same color, so fading
/// between them is stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgbw {
    r: u8,
    g: u8,
    b: u8,
    w: u8,
}

impl Rgbw {
    pub fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        if w == 0 {
            Rgb::new(r, g, b).to_rgbw()
        } else {
            Self { r, g, b, w }
        }
    }

    pub fn r(self) -> u8 {
        self.r
    }

    pub fn g(self) -> u8 {
        self.g
    }

    pub fn b(self) -> u8 {
        self.b
    }

    pub fn w(self) -> u8 {
        self.w
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.w]
    }

    /// Add white back into each chromatic channel, saturating at 255.
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.r.saturating_add(self.w),
            g: self.g.saturating_add(self.w),
            b: self.b.saturating_add(self.w),
        }
    }
}

/// An immutable LED color value.
///
/// Serializes as its web hex form (`#rrggbb` or `#rrggbbww`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Rgb(Rgb),
    Rgbw(Rgbw),
}

impl Default for Color {
    fn default() -> Self {
        Self::black(ColorLayout::Rgb)
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Build a normalized RGBW color (see [`Rgbw::new`]).
    pub fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self::Rgbw(Rgbw::new(r, g, b, w))
    }

    pub fn black(layout: ColorLayout) -> Self {
        match layout {
            ColorLayout::Rgb => Self::Rgb(Rgb::default()),
            ColorLayout::Rgbw => Self::Rgbw(Rgbw::default()),
        }
    }

    pub fn layout(&self) -> ColorLayout {
        match self {
            Self::Rgb(_) => ColorLayout::Rgb,
            Self::Rgbw(_) => ColorLayout::Rgbw,
        }
    }

    /// RGB: all three channels zero. RGBW: all four channels zero.
    pub fn is_black(&self) -> bool {
        match self {
            Self::Rgb(c) => c.to_array() == [0, 0, 0],
            Self::Rgbw(c) => c.to_array() == [0, 0, 0, 0],
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb(c) => *c,
            Self::Rgbw(c) => c.to_rgb(),
        }
    }

    pub fn to_rgbw(&self) -> Rgbw {
        match self {
            Self::Rgb(c) => c.to_rgbw(),
            Self::Rgbw(c) => *c,
        }
    }

    /// Explicit conversion into `layout`; a no-op when the layout already matches.
    pub fn to_layout(&self, layout: ColorLayout) -> Self {
        match layout {
            ColorLayout::Rgb => Self::Rgb(self.to_rgb()),
            ColorLayout::Rgbw => Self::Rgbw(self.to_rgbw()),
        }
    }

    /// Per-channel linear interpolation toward `other`.
    ///
    /// `factor` outside `[0, 1]` is accepted and the result clamped. Both
    /// operands must share a layout; convert explicitly with [`Color::to_layout`].
    pub fn fade(&self, other: &Color, factor: f64) -> LedResult<Color> {
        self.zip_with(other, |a, b| lerp_channel(a, b, factor))
    }

    /// Factor-weighted blend of `other` onto `self` under `mode`.
    pub fn mix(&self, other: &Color, factor: f64, mode: BlendMode) -> LedResult<Color> {
        self.zip_with(other, |a, b| mode.mix_channel(a, b, factor))
    }

    /// Combine a destination cell (`self`) with a source cell under `mode`.
    pub fn blend(&self, other: &Color, mode: BlendMode) -> LedResult<Color> {
        self.zip_with(other, |a, b| mode.combine_channel(a, b))
    }

    /// Multiply every channel by `factor`, clamped.
    pub fn scale(&self, factor: f64) -> Color {
        match self {
            Self::Rgb(c) => Self::rgb(
                scale_channel(c.r, factor),
                scale_channel(c.g, factor),
                scale_channel(c.b, factor),
            ),
            Self::Rgbw(c) => Self::rgbw(
                scale_channel(c.r, factor),
                scale_channel(c.g, factor),
                scale_channel(c.b, factor),
                scale_channel(c.w, factor),
            ),
        }
    }

    /// `#`-prefixed lower-case hex, two digits per channel.
    pub fn web(&self) -> String {
        match self {
            Self::Rgb(c) => format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
            Self::Rgbw(c) => format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.w),
        }
    }

    /// Parse `rrggbb` / `rrggbbww`, optionally prefixed with `#` or `0x`.
    pub fn parse_hex(s: &str) -> LedResult<Color> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LedError::invalid_argument(format!(
                "color literal '{s}' contains non-hex characters"
            )));
        }

        let channel = |i: usize| -> LedResult<u8> {
            u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|e| LedError::invalid_argument(format!("color literal '{s}': {e}")))
        };

        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(1)?, channel(2)?)),
            8 => Ok(Self::rgbw(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
            n => Err(LedError::invalid_argument(format!(
                "color literal '{s}' has {n} hex digits, expected 6 or 8"
            ))),
        }
    }

    fn zip_with(&self, other: &Color, f: impl Fn(u8, u8) -> u8) -> LedResult<Color> {
        match (self, other) {
            (Self::Rgb(a), Self::Rgb(b)) => Ok(Self::rgb(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b))),
            (Self::Rgbw(a), Self::Rgbw(b)) => Ok(Self::rgbw(
                f(a.r, b.r),
                f(a.g, b.g),
                f(a.b, b.b),
                f(a.w, b.w),
            )),
            _ => Err(LedError::invalid_argument(format!(
                "cannot combine {:?} color with {:?} color",
                self.layout(),
                other.layout()
            ))),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(c) => write!(f, "[{}, {}, {}]", c.r, c.g, c.b),
            Self::Rgbw(c) => write!(f, "[{}, {}, {}, {}]", c.r, c.g, c.b, c.w),
        }
    }
}

impl FromStr for Color {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = LedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.web()
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Self::Rgb(c)
    }
}

impl From<Rgbw> for Color {
    fn from(c: Rgbw) -> Self {
        Self::Rgbw(c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/model.rs"]
mod tests;
