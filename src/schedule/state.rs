use crate::foundation::core::Timestamp;
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::schedule::window::ScheduleWindow;

/// Coarse classification of a schedule at one timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScheduleStatus {
    /// At some later time the schedule may become active.
    Pending,
    /// The schedule is active at the evaluated time.
    Active,
    /// At the evaluated time and every later one the schedule will not be active again.
    /// A terminated schedule always knows its last active timestamp.
    Terminated,
}

/// Status plus the window that accompanies active and terminated schedules.
///
/// Fields are private so that the invariants hold for every value in circulation:
/// pending carries no window, active carries one, terminated carries one with a known
/// last active timestamp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScheduleState {
    status: ScheduleStatus,
    window: Option<ScheduleWindow>,
}

impl ScheduleState {
    pub fn pending() -> Self {
        Self {
            status: ScheduleStatus::Pending,
            window: None,
        }
    }

    pub fn active(window: ScheduleWindow) -> Self {
        Self {
            status: ScheduleStatus::Active,
            window: Some(window),
        }
    }

    /// Active state missing its window; only reachable from tests that exercise
    /// consumers' consistency checks.
    #[cfg(test)]
    pub(crate) fn active_without_window() -> Self {
        Self {
            status: ScheduleStatus::Active,
            window: None,
        }
    }

    /// Terminated state; rejects a window without a last active timestamp.
    pub fn terminated(window: ScheduleWindow) -> StagehandResult<Self> {
        if window.last_active().is_none() {
            return Err(StagehandError::schedule(
                "a terminated schedule must specify its last active timestamp",
            ));
        }
        Ok(Self {
            status: ScheduleStatus::Terminated,
            window: Some(window),
        })
    }

    /// Terminated state over a finite window; cannot fail.
    pub fn terminated_between(
        first_active: Timestamp,
        last_active: Timestamp,
        current: Timestamp,
    ) -> Self {
        Self {
            status: ScheduleStatus::Terminated,
            window: Some(ScheduleWindow::finite(first_active, last_active, current)),
        }
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    pub fn window(&self) -> Option<&ScheduleWindow> {
        self.window.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == ScheduleStatus::Pending
    }

    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Active
    }

    pub fn is_terminated(&self) -> bool {
        self.status == ScheduleStatus::Terminated
    }

    /// Last active timestamp of a terminated state.
    pub fn last_active(&self) -> Option<Timestamp> {
        self.window.and_then(|w| w.last_active())
    }

    /// Shift the window (if any) by `seconds`. Finiteness is preserved, so the
    /// terminated invariant still holds.
    pub fn offset_seconds(self, seconds: f64) -> Self {
        Self {
            status: self.status,
            window: self.window.map(|w| w.offset_seconds(seconds)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/state.rs"]
mod tests;
