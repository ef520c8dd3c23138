//! Temporal scheduling: when is an animation pending, active, or finished.
pub mod scheduler;
pub mod sequencer;
pub mod state;
pub mod window;
