/// The physical corner of a panel that the device treats as local `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Origin {
    pub const ALL: [Origin; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Map panel-relative logical coordinates (top-left origin) to device-local ones.
    ///
    /// Each mapping is a reflection, so it is its own inverse; see [`Origin::to_logical`].
    pub fn to_local(self, x: u32, y: u32, width: u32, height: u32) -> (u32, u32) {
        let flip_x = |v: u32| width - 1 - v;
        let flip_y = |v: u32| height - 1 - v;
        match self {
            Self::TopLeft => (x, y),
            Self::TopRight => (flip_x(x), y),
            Self::BottomLeft => (x, flip_y(y)),
            Self::BottomRight => (flip_x(x), flip_y(y)),
        }
    }

    pub fn to_logical(self, lx: u32, ly: u32, width: u32, height: u32) -> (u32, u32) {
        self.to_local(lx, ly, width, height)
    }
}

impl std::str::FromStr for Origin {
    type Err = crate::LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "top_left" => Ok(Self::TopLeft),
            "top_right" => Ok(Self::TopRight),
            "bottom_left" => Ok(Self::BottomLeft),
            "bottom_right" => Ok(Self::BottomRight),
            other => Err(crate::LedError::invalid_argument(format!(
                "unknown origin '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/origin.rs"]
mod tests;
