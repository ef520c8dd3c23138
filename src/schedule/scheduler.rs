use std::rc::Rc;

use crate::foundation::core::Timestamp;
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::schedule::state::ScheduleState;
use crate::schedule::window::ScheduleWindow;

/// Classifies an animation's temporal status at a given global time.
///
/// Implementations are pure functions of `timestamp` and their own configuration. Callers may
/// evaluate them at arbitrary, non-monotonic times, so nothing may be cached on call order.
pub trait Scheduler {
    /// Schedule state at `timestamp`. Total over every finite timestamp, negative included.
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState;
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        (**self).schedule_state(timestamp)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        (**self).schedule_state(timestamp)
    }
}

/// Active on `[start, end]`, pending before, terminated after.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireOnceScheduler {
    start: f64,
    end: f64,
}

impl FireOnceScheduler {
    pub fn new(start_seconds: f64, end_seconds: f64) -> StagehandResult<Self> {
        if !start_seconds.is_finite() || !end_seconds.is_finite() {
            return Err(StagehandError::schedule("fire-once bounds must be finite"));
        }
        if start_seconds > end_seconds {
            return Err(StagehandError::schedule("fire-once start must be <= end"));
        }
        Ok(Self {
            start: start_seconds,
            end: end_seconds,
        })
    }

    pub fn start_seconds(&self) -> f64 {
        self.start
    }

    pub fn end_seconds(&self) -> f64 {
        self.end
    }
}

impl Scheduler for FireOnceScheduler {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        let t = timestamp.seconds();
        if t < self.start {
            return ScheduleState::pending();
        }
        let (first, last) = (Timestamp(self.start), Timestamp(self.end));
        if t > self.end {
            return ScheduleState::terminated_between(first, last, timestamp);
        }
        ScheduleState::active(ScheduleWindow::finite(first, last, timestamp))
    }
}

fn validate_period(what: &str, interval: f64) -> StagehandResult<()> {
    if !interval.is_finite() || interval <= 0.0 {
        return Err(StagehandError::schedule(format!(
            "{what} interval must be finite and > 0 (got {interval})"
        )));
    }
    Ok(())
}

/// Re-fires its delegate every `interval` seconds by feeding it `t mod interval`.
///
/// The remainder keeps the sign of `t`. Termination of the delegate is only ever
/// transient here (it re-activates next period), so anything that waits for completion,
/// such as a [`SequencedScheduler`], must not wrap a repeat.
#[derive(Clone, Debug)]
pub struct RepeatScheduler<S> {
    interval: f64,
    delegate: S,
}

impl<S: Scheduler> RepeatScheduler<S> {
    pub fn new(interval: f64, delegate: S) -> StagehandResult<Self> {
        validate_period("repeat", interval)?;
        Ok(Self { interval, delegate })
    }
}

impl<S: Scheduler> Scheduler for RepeatScheduler<S> {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        let rebased = Timestamp(timestamp.seconds() % self.interval);
        self.delegate.schedule_state(rebased)
    }
}

/// Plays its delegate forward over `interval`, then backward over the next `interval`.
#[derive(Clone, Debug)]
pub struct PingPongScheduler<S> {
    interval: f64,
    delegate: S,
}

impl<S: Scheduler> PingPongScheduler<S> {
    pub fn new(interval: f64, delegate: S) -> StagehandResult<Self> {
        validate_period("ping-pong", interval)?;
        Ok(Self { interval, delegate })
    }

    /// Triangle wave of period `2 * interval` applied to `t`.
    pub fn reflected_seconds(&self, t: f64) -> f64 {
        let d = t % (2.0 * self.interval);
        if d > self.interval {
            self.interval - (d - self.interval)
        } else {
            d
        }
    }
}

impl<S: Scheduler> Scheduler for PingPongScheduler<S> {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        let reflected = Timestamp(self.reflected_seconds(timestamp.seconds()));
        self.delegate.schedule_state(reflected)
    }
}

/// Shifts its delegate later by `delay` seconds.
///
/// Returned windows are translated back into the caller's time base, so a delayed
/// schedule that terminates reports the global timestamp it last ran at.
#[derive(Clone, Debug)]
pub struct DelayScheduler<S> {
    delay: f64,
    delegate: S,
}

impl<S: Scheduler> DelayScheduler<S> {
    pub fn new(delay: f64, delegate: S) -> StagehandResult<Self> {
        if !delay.is_finite() {
            return Err(StagehandError::schedule("delay must be finite"));
        }
        Ok(Self { delay, delegate })
    }
}

impl<S: Scheduler> Scheduler for DelayScheduler<S> {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        self.delegate
            .schedule_state(timestamp.offset_by_seconds(-self.delay))
            .offset_seconds(self.delay)
    }
}

/// Starts `delegate` exactly when `first` terminates.
///
/// While `first` is pending or active this reports pending and never consults the
/// delegate. Afterwards the delegate sees time relative to `first`'s last active
/// timestamp, and its window is translated back into global time.
#[derive(Clone, Debug)]
pub struct SequencedScheduler<A, B> {
    first: A,
    delegate: B,
    name: String,
}

impl<A: Scheduler, B: Scheduler> SequencedScheduler<A, B> {
    pub fn new(first: A, delegate: B, name: impl Into<String>) -> Self {
        Self {
            first,
            delegate,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<A: Scheduler, B: Scheduler> Scheduler for SequencedScheduler<A, B> {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        let first = self.first.schedule_state(timestamp);
        let Some(offset) = first.last_active().filter(|_| first.is_terminated()) else {
            return ScheduleState::pending();
        };

        let offset = offset.seconds();
        tracing::trace!(sequence = %self.name, offset, "sequence delegate consulted");
        self.delegate
            .schedule_state(timestamp.offset_by_seconds(-offset))
            .offset_seconds(offset)
    }
}

/// Fluent builders over the scheduler combinators.
pub trait SchedulerExt: Scheduler + Sized {
    fn delayed(self, delay: f64) -> StagehandResult<DelayScheduler<Self>> {
        DelayScheduler::new(delay, self)
    }

    fn repeated(self, interval: f64) -> StagehandResult<RepeatScheduler<Self>> {
        RepeatScheduler::new(interval, self)
    }

    fn ping_pong(self, interval: f64) -> StagehandResult<PingPongScheduler<Self>> {
        PingPongScheduler::new(interval, self)
    }

    /// Run `next` once `self` terminates.
    fn then<B: Scheduler>(self, next: B, name: impl Into<String>) -> SequencedScheduler<Self, B> {
        SequencedScheduler::new(self, next, name)
    }

    /// Type-erase into a shareable handle, as stored by the timeline.
    fn shared(self) -> Rc<dyn Scheduler>
    where
        Self: 'static,
    {
        Rc::new(self)
    }
}

impl<S: Scheduler> SchedulerExt for S {}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
