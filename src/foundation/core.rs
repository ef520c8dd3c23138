use crate::foundation::error::{StagehandError, StagehandResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Absolute playback time in seconds.
///
/// Timestamps are plain values: equality is exact numeric equality and every offset
/// produces a new value.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Start of playback.
    pub const ZERO: Self = Self(0.0);

    /// Create a timestamp from seconds.
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Create a timestamp, rejecting NaN and infinities.
    pub fn checked(seconds: f64) -> StagehandResult<Self> {
        if !seconds.is_finite() {
            return Err(StagehandError::schedule("timestamp must be finite"));
        }
        Ok(Self(seconds))
    }

    /// Seconds since playback start.
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Return this timestamp shifted by `seconds` (which may be negative).
    pub fn offset_by_seconds(self, seconds: f64) -> Self {
        Self(self.0 + seconds)
    }
}

impl From<f64> for Timestamp {
    fn from(seconds: f64) -> Self {
        Self(seconds)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
