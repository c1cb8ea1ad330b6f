/// Convenience result type used across ledwall.
pub type LedResult<T> = Result<T, LedError>;

/// Error taxonomy shared by the color, composition, fade and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum LedError {
    /// Malformed input or an operation across incompatible values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A device sink rejected a push or a mode change.
    #[error("endpoint unavailable: {0}")]
    EndpointUnavailable(String),

    /// A transition/blend/direction combination that is not implemented.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// One or more devices of an array did not receive a frame.
    #[error("delivery failed for {failed} of {total} device(s)")]
    Delivery {
        /// Number of devices whose push failed.
        failed: usize,
        /// Number of devices in the array.
        total: usize,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LedError {
    /// Build a [`LedError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`LedError::EndpointUnavailable`] value.
    pub fn endpoint_unavailable(msg: impl Into<String>) -> Self {
        Self::EndpointUnavailable(msg.into())
    }

    /// Build a [`LedError::NotSupported`] value.
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// True for errors raised by a device endpoint rather than by the caller's input.
    pub fn is_endpoint(&self) -> bool {
        matches!(self, Self::EndpointUnavailable(_) | Self::Delivery { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
