//! Animations, interpolation curves, and scene-targeting actions.

pub mod actions;
pub mod anim;
pub mod ease;
