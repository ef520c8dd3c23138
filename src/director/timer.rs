use std::time::Instant;

/// Source of playback time, in seconds since the last [`restart`](Timer::restart).
pub trait Timer {
    fn restart(&mut self);
    fn time_seconds(&mut self) -> f64;
}

/// Wall-clock timer backed by a monotonic [`Instant`].
#[derive(Clone, Debug)]
pub struct ClockTimer {
    started: Instant,
    scale: f64,
}

impl ClockTimer {
    pub fn new() -> Self {
        Self::scaled(1.0)
    }

    /// Timer whose seconds run `scale` times faster than real time.
    pub fn scaled(scale: f64) -> Self {
        Self {
            started: Instant::now(),
            scale,
        }
    }
}

impl Default for ClockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for ClockTimer {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn time_seconds(&mut self) -> f64 {
        self.started.elapsed().as_secs_f64() * self.scale
    }
}

/// Deterministic timer: the n-th query after a restart reports `n * step`.
#[derive(Clone, Debug, PartialEq)]
pub struct SteppedTimer {
    step: f64,
    queries: u64,
}

impl SteppedTimer {
    pub fn new(step: f64) -> Self {
        Self { step, queries: 0 }
    }

    /// One step per frame at `fps` frames per second.
    pub fn from_fps(fps: f64) -> Self {
        Self::new(1.0 / fps)
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Timer for SteppedTimer {
    fn restart(&mut self) {
        self.queries = 0;
    }

    fn time_seconds(&mut self) -> f64 {
        let t = self.queries as f64 * self.step;
        self.queries += 1;
        t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/timer.rs"]
mod tests;
