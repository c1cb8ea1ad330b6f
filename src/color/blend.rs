use crate::foundation::math::{add_scaled, lerp_channel, sub_scaled};

/// How a source color is combined with the color already in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source overwrites destination.
    #[default]
    Replace,
    /// Per-channel mean; weighted by the factor when mixing.
    Average,
    /// Per-channel saturating sum.
    Add,
    /// Per-channel saturating difference.
    Subtract,
}

impl BlendMode {
    pub const ALL: [BlendMode; 4] = [Self::Replace, Self::Average, Self::Add, Self::Subtract];

    /// Full-strength combination, as used when stamping one frame onto another.
    pub(crate) fn combine_channel(self, dst: u8, src: u8) -> u8 {
        match self {
            Self::Replace => src,
            Self::Average => lerp_channel(dst, src, 0.5),
            Self::Add => dst.saturating_add(src),
            Self::Subtract => dst.saturating_sub(src),
        }
    }

    /// Partial-strength combination used while a transition is in flight.
    pub(crate) fn mix_channel(self, dst: u8, src: u8, factor: f64) -> u8 {
        match self {
            Self::Replace => src,
            Self::Average => lerp_channel(dst, src, factor),
            Self::Add => add_scaled(dst, src, factor),
            Self::Subtract => sub_scaled(dst, src, factor),
        }
    }
}

impl std::str::FromStr for BlendMode {
    type Err = crate::LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "average" | "avg" => Ok(Self::Average),
            "add" => Ok(Self::Add),
            "subtract" | "sub" => Ok(Self::Subtract),
            other => Err(crate::LedError::invalid_argument(format!(
                "unknown blend mode '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/blend.rs"]
mod tests;
