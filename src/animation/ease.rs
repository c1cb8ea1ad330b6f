use std::f64::consts::PI;

/// Shapes the linear progress of a transition before it is composed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    /// Slow start (`t²`).
    In,
    /// Slow finish.
    Out,
    /// Smoothstep.
    InOut,
    /// Half cosine.
    Sine,
}

impl Ease {
    pub const ALL: [Ease; 5] = [Self::Linear, Self::In, Self::Out, Self::InOut, Self::Sine];

    /// Map progress `t` (clamped to `[0, 1]`) onto the curve; both endpoints are fixed.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::In => t * t,
            Self::Out => t * (2.0 - t),
            Self::InOut => t * t * (3.0 - 2.0 * t),
            Self::Sine => 0.5 - 0.5 * (PI * t).cos(),
        }
    }
}

impl std::str::FromStr for Ease {
    type Err = crate::LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "linear" => Ok(Self::Linear),
            "in" | "easein" => Ok(Self::In),
            "out" | "easeout" => Ok(Self::Out),
            "inout" | "easeinout" | "smoothstep" => Ok(Self::InOut),
            "sine" => Ok(Self::Sine),
            _ => Err(crate::LedError::invalid_argument(format!("unknown ease '{s}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
