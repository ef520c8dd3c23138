//! Pairs schedulers with animations and drives their lifecycle once per frame.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::animation::anim::SharedAnimation;
use crate::foundation::core::Timestamp;
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::schedule::scheduler::Scheduler;
use crate::schedule::state::{ScheduleState, ScheduleStatus};
use crate::schedule::window::ScheduleWindow;

/// Outcome of a single [`Timeline::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Every entry reported `Terminated` at this time. Also `true` for an empty timeline.
    pub all_terminated: bool,
}

struct Entry {
    scheduler: Rc<dyn Scheduler>,
    animation: SharedAnimation,
}

/// Identity of a shared animation, independent of which entries point at it.
type AnimationKey = *const ();

fn animation_key(animation: &SharedAnimation) -> AnimationKey {
    Rc::as_ptr(animation) as *const ()
}

/// Insertion-ordered registry of `(scheduler, animation)` pairs.
///
/// Animations are tracked as active from their first `Active` frame until the frame on
/// which their scheduler reports `Terminated`; the tracked window is the latest one they
/// were animated with and is what `terminate` receives.
#[derive(Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    active: HashMap<AnimationKey, ScheduleWindow>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. The same scheduler or animation may appear in several entries.
    pub fn add(&mut self, scheduler: Rc<dyn Scheduler>, animation: SharedAnimation) {
        self.entries.push(Entry {
            scheduler,
            animation,
        });
    }

    /// Drop every entry and forget which animations were active.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of animations currently tracked as active.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Advance to `time`.
    ///
    /// Terminations for the whole timeline are dispatched before any activation or
    /// animation, so an animation ending this frame sets its end state before a successor
    /// reads it. Each scheduler is evaluated once per call.
    ///
    /// An animation error aborts the update; entries already dispatched keep their effects.
    #[tracing::instrument(level = "trace", skip(self), fields(entries = self.entries.len()))]
    pub fn update(&mut self, time: Timestamp) -> StagehandResult<UpdateResult> {
        let states: Vec<ScheduleState> = self
            .entries
            .iter()
            .map(|e| e.scheduler.schedule_state(time))
            .collect();

        for (entry, state) in self.entries.iter().zip(&states) {
            if !state.is_terminated() {
                continue;
            }
            if let Some(window) = self.active.remove(&animation_key(&entry.animation)) {
                tracing::debug!(t = time.seconds(), "terminating animation");
                entry.animation.borrow_mut().terminate(&window)?;
            }
        }

        let mut all_terminated = true;
        for (entry, state) in self.entries.iter().zip(&states) {
            match (state.status(), state.window()) {
                (ScheduleStatus::Terminated, _) => {}
                (ScheduleStatus::Active, Some(window)) => {
                    all_terminated = false;
                    let key = animation_key(&entry.animation);
                    let mut animation = entry.animation.borrow_mut();
                    if !self.active.contains_key(&key) {
                        tracing::debug!(t = time.seconds(), "activating animation");
                        animation.activate(window)?;
                    }
                    animation.animate(window)?;
                    self.active.insert(key, *window);
                }
                (ScheduleStatus::Pending, _) => all_terminated = false,
                (ScheduleStatus::Active, None) => {
                    return Err(StagehandError::schedule(
                        "scheduler reported an active state without a window",
                    ));
                }
            }
        }

        Ok(UpdateResult { all_terminated })
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("entries", &self.entries.len())
            .field("active", &self.active.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
