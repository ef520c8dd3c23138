//! Stagehand drives time-based procedural animation of a hierarchical scene.
//!
//! Two subsystems do the work:
//!
//! - [`schedule`]: composable schedulers that classify any timestamp as pending, active,
//!   or terminated and report the window an animation is bounded by.
//! - [`scene`]: a tree of nodes with local affine transforms, world-space bounds, and
//!   origin re-rooting that keeps the drawn result unchanged.
//!
//! A [`Timeline`] pairs schedulers with [`Animation`]s and dispatches their lifecycle each
//! frame; a [`Director`] composes common scene moves and runs the playback loop against a
//! [`Renderer`].
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod director;
pub mod render;
pub mod scene;
pub mod schedule;
pub mod timeline;

pub use crate::foundation::core::{Affine, Point, Rect, Timestamp, Vec2};
pub use crate::foundation::error::{StagehandError, StagehandResult};

pub use crate::animation::anim::{Animation, InterpolatedAnimation, Lerp, SharedAnimation, shared};
pub use crate::animation::ease::{Curve, Ease, Reversed, reverse};
pub use crate::director::{
    ClockTimer, Director, DirectorOpts, PlaybackEnd, PlaybackSummary, SteppedTimer, Timer,
};
pub use crate::render::draw::{DrawItem, draw_list};
pub use crate::render::recording::RecordingRenderer;
pub use crate::render::{RenderStatus, Renderer};
pub use crate::scene::node::{SceneNode, WeakSceneNode};
pub use crate::scene::primitive::{Block, Boundable, Buildable, Dot, Empty, Primitive};
pub use crate::schedule::scheduler::{
    DelayScheduler, FireOnceScheduler, PingPongScheduler, RepeatScheduler, Scheduler,
    SchedulerExt, SequencedScheduler,
};
pub use crate::schedule::sequencer::Sequencer;
pub use crate::schedule::state::{ScheduleState, ScheduleStatus};
pub use crate::schedule::window::{ScheduleWindow, WindowBounds};
pub use crate::timeline::{Timeline, UpdateResult};
