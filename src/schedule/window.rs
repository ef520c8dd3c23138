use crate::foundation::core::Timestamp;
use crate::foundation::error::{StagehandError, StagehandResult};

/// First and last active timestamps of a finite window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowBounds {
    /// First timestamp at which the schedule is active.
    pub first_active: Timestamp,
    /// Last timestamp at which the schedule is active.
    pub last_active: Timestamp,
}

/// A single contiguous span in which a schedule is active, plus the evaluation time.
///
/// The bounds are either both known ("finite") or both unknown; a window with a single
/// bound cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleWindow {
    bounds: Option<WindowBounds>,
    current: Timestamp,
}

impl ScheduleWindow {
    /// Window with both bounds known.
    pub fn finite(first_active: Timestamp, last_active: Timestamp, current: Timestamp) -> Self {
        Self {
            bounds: Some(WindowBounds {
                first_active,
                last_active,
            }),
            current,
        }
    }

    /// Window whose bounds are unknown; only the current time is set.
    pub fn unbounded(current: Timestamp) -> Self {
        Self {
            bounds: None,
            current,
        }
    }

    /// Checked constructor from optional bounds. Exactly one bound is rejected.
    pub fn new(
        first_active: Option<Timestamp>,
        last_active: Option<Timestamp>,
        current: Timestamp,
    ) -> StagehandResult<Self> {
        match (first_active, last_active) {
            (Some(first), Some(last)) => Ok(Self::finite(first, last, current)),
            (None, None) => Ok(Self::unbounded(current)),
            _ => Err(StagehandError::schedule(
                "schedule window must have both bounds or neither",
            )),
        }
    }

    pub fn current(&self) -> Timestamp {
        self.current
    }

    pub fn bounds(&self) -> Option<WindowBounds> {
        self.bounds
    }

    pub fn first_active(&self) -> Option<Timestamp> {
        self.bounds.map(|b| b.first_active)
    }

    pub fn last_active(&self) -> Option<Timestamp> {
        self.bounds.map(|b| b.last_active)
    }

    /// Return this window with every present field shifted by `seconds`.
    pub fn offset_seconds(&self, seconds: f64) -> Self {
        Self {
            bounds: self.bounds.map(|b| WindowBounds {
                first_active: b.first_active.offset_by_seconds(seconds),
                last_active: b.last_active.offset_by_seconds(seconds),
            }),
            current: self.current.offset_by_seconds(seconds),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.bounds.is_some()
    }

    /// `true` for a finite window whose first and last active timestamps coincide.
    pub fn is_instantaneous(&self) -> bool {
        self.bounds.is_some_and(|b| b.first_active == b.last_active)
    }

    /// Normalized position of `current` inside the window.
    ///
    /// Fails for unbounded and instantaneous windows; callers check
    /// [`ScheduleWindow::is_instantaneous`] first when a zero-length window is possible.
    pub fn percent_complete(&self) -> StagehandResult<f64> {
        let Some(b) = self.bounds else {
            return Err(StagehandError::schedule("schedule window is not bounded"));
        };
        let span = b.last_active.seconds() - b.first_active.seconds();
        if span == 0.0 {
            return Err(StagehandError::schedule(
                "schedule window is instantaneous; percent complete is undefined",
            ));
        }
        Ok((self.current.seconds() - b.first_active.seconds()) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/window.rs"]
mod tests;
