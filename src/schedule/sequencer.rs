use crate::foundation::error::{StagehandError, StagehandResult};
use crate::schedule::scheduler::FireOnceScheduler;

/// Staggered start/end times for the elements of a group.
///
/// Element `i` starts at `offset + i * (period - overlap)` and runs for `period` seconds, so
/// consecutive elements overlap by `overlap` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Sequencer {
    pub offset: f64,
    pub period: f64,
    pub overlap: f64,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            offset: 0.0,
            period: 1.0,
            overlap: 0.0,
        }
    }
}

impl Sequencer {
    pub fn new(offset: f64, period: f64, overlap: f64) -> Self {
        Self {
            offset,
            period,
            overlap,
        }
    }

    /// Spread `count` elements so that the last one starts `duration` seconds after the
    /// first, each overlapping its successor by `overlap`.
    pub fn filling_interval(count: usize, duration: f64, overlap: f64) -> StagehandResult<Self> {
        if count < 2 {
            return Err(StagehandError::schedule(
                "a sequence must consist of at least 2 elements",
            ));
        }
        let interval = duration / (count - 1) as f64;
        Ok(Self {
            offset: 0.0,
            period: interval + overlap,
            overlap,
        })
    }

    pub fn validate(&self) -> StagehandResult<()> {
        if !(self.offset.is_finite() && self.period.is_finite() && self.overlap.is_finite()) {
            return Err(StagehandError::schedule("sequencer values must be finite"));
        }
        if self.period <= 0.0 {
            return Err(StagehandError::schedule("sequencer period must be > 0"));
        }
        Ok(())
    }

    pub fn start(&self, element: usize) -> f64 {
        (self.period - self.overlap) * element as f64 + self.offset
    }

    pub fn end(&self, element: usize) -> f64 {
        self.start(element) + self.period
    }

    /// Fire-once schedule covering element `element`.
    pub fn fire_once(&self, element: usize) -> StagehandResult<FireOnceScheduler> {
        FireOnceScheduler::new(self.start(element), self.end(element))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/sequencer.rs"]
mod tests;
