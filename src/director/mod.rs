//! Composes scheduler/animation pairs for common scene moves and runs the playback loop.

pub mod opts;
pub mod timer;

use std::rc::Rc;

use crate::animation::actions;
use crate::animation::anim::{InterpolatedAnimation, shared};
use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Timestamp};
use crate::foundation::error::StagehandResult;
use crate::render::{RenderStatus, Renderer};
use crate::scene::node::SceneNode;
use crate::schedule::sequencer::Sequencer;
use crate::timeline::Timeline;

pub use opts::DirectorOpts;
pub use timer::{ClockTimer, SteppedTimer, Timer};

/// Why a playback loop returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// Every scheduled animation terminated.
    TimelineFinished,
    /// The renderer reported [`RenderStatus::Closed`].
    RendererClosed,
}

/// Outcome of [`Director::play`] / [`Director::play_forever`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSummary {
    /// Frames presented by the renderer.
    pub frames: usize,
    /// Timeline time of the last update, after scaling.
    pub last_time: f64,
    pub end: PlaybackEnd,
}

/// Owns the timeline and drives it against a scene root and a renderer.
///
/// The director is the only writer of its timeline: scene moves (`build`, `unbuild`,
/// `arrange`) append pairs, and the playback loops advance it.
#[derive(Debug)]
pub struct Director<R> {
    root: SceneNode,
    timeline: Timeline,
    renderer: R,
    opts: DirectorOpts,
}

impl<R: Renderer> Director<R> {
    pub fn new(root: SceneNode, renderer: R, opts: DirectorOpts) -> StagehandResult<Self> {
        opts.validate()?;
        Ok(Self {
            root,
            timeline: Timeline::new(),
            renderer,
            opts,
        })
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn opts(&self) -> &DirectorOpts {
        &self.opts
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Direct access for callers scheduling their own pairs.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Grow every buildable primitive under `node` from 0 to 1, staggered by the default
    /// build sequencer. Returns how many primitives were scheduled.
    pub fn build(&mut self, node: &SceneNode) -> StagehandResult<usize> {
        self.build_with(node, self.opts.build_sequencer)
    }

    /// [`build`](Self::build) with an explicit stagger. Primitives are hidden immediately.
    pub fn build_with(&mut self, node: &SceneNode, sequencer: Sequencer) -> StagehandResult<usize> {
        self.schedule_build(node, sequencer, 0.0, Ease::EaseInOut)
    }

    /// Shrink every buildable primitive under `node` from 1 to 0.
    pub fn unbuild(&mut self, node: &SceneNode) -> StagehandResult<usize> {
        self.unbuild_with(node, self.opts.build_sequencer)
    }

    pub fn unbuild_with(
        &mut self,
        node: &SceneNode,
        sequencer: Sequencer,
    ) -> StagehandResult<usize> {
        self.schedule_build(node, sequencer, 1.0, Ease::EaseInOut.reversed())
    }

    fn schedule_build(
        &mut self,
        node: &SceneNode,
        sequencer: Sequencer,
        initial: f64,
        ease: Ease,
    ) -> StagehandResult<usize> {
        sequencer.validate()?;

        let mut buildables = Vec::new();
        node.visit_recursive(&mut |n: &SceneNode| {
            if n.build_percent().is_some() {
                buildables.push(n.clone());
            }
        });

        for (index, n) in buildables.iter().enumerate() {
            n.set_build_percent(initial);
            self.timeline.add(
                Rc::new(sequencer.fire_once(index)?),
                shared(InterpolatedAnimation::new(
                    ease.clone(),
                    actions::build_percent(n),
                )),
            );
        }
        tracing::debug!(count = buildables.len(), initial, "build scheduled");
        Ok(buildables.len())
    }

    /// Line `nodes` up in a horizontal row centred on `target`'s world origin.
    ///
    /// Each node's origin moves to the centre of its slot, so nodes are expected to have
    /// their origin at their bounds' midpoint. Slots are as wide as each node's recursive
    /// world bounds and separated by `arrange_spacing`. The x and y motions are staggered
    /// independently by `x_sequencer` and `y_sequencer`.
    pub fn arrange(
        &mut self,
        target: &SceneNode,
        nodes: &[SceneNode],
        x_sequencer: Sequencer,
        y_sequencer: Sequencer,
    ) -> StagehandResult<()> {
        x_sequencer.validate()?;
        y_sequencer.validate()?;
        if nodes.is_empty() {
            return Ok(());
        }

        let width_of = |n: &SceneNode| n.world_bounds_recursive().map_or(0.0, |b| b.width());
        let spacing = self.opts.arrange_spacing;
        let total_width = nodes.iter().map(width_of).sum::<f64>()
            + spacing * (nodes.len() - 1) as f64;

        let anchor = target.world_origin();
        let mut slot_left = anchor.x - total_width * 0.5;
        for (index, node) in nodes.iter().enumerate() {
            let width = width_of(node);
            let world_target = Point::new(slot_left + width * 0.5, anchor.y);
            let in_parent = match node.parent() {
                Some(parent) => parent.world_to_local_transform()? * world_target,
                None => world_target,
            };
            let start = node.translation();

            self.timeline.add(
                Rc::new(x_sequencer.fire_once(index)?),
                shared(InterpolatedAnimation::new(
                    Ease::EaseInOut,
                    actions::x_translation(start.x, in_parent.x, node),
                )),
            );
            self.timeline.add(
                Rc::new(y_sequencer.fire_once(index)?),
                shared(InterpolatedAnimation::new(
                    Ease::EaseInOut,
                    actions::y_translation(start.y, in_parent.y, node),
                )),
            );
            slot_left += width + spacing;
        }
        tracing::debug!(count = nodes.len(), total_width, "arrange scheduled");
        Ok(())
    }

    /// Run until every scheduled animation has terminated or the renderer closes.
    ///
    /// The timeline is cleared when it finishes. A timeline that is already empty
    /// finishes on the first update without rendering.
    #[tracing::instrument(skip_all, fields(entries = self.timeline.len()))]
    pub fn play(&mut self, timer: &mut dyn Timer) -> StagehandResult<PlaybackSummary> {
        self.run(timer, false)
    }

    /// Keep rendering until the renderer closes, clearing the timeline whenever it
    /// finishes instead of returning.
    #[tracing::instrument(skip_all, fields(entries = self.timeline.len()))]
    pub fn play_forever(&mut self, timer: &mut dyn Timer) -> StagehandResult<PlaybackSummary> {
        self.run(timer, true)
    }

    fn run(&mut self, timer: &mut dyn Timer, forever: bool) -> StagehandResult<PlaybackSummary> {
        timer.restart();
        let mut frames = 0;
        loop {
            let last_time = timer.time_seconds() * self.opts.time_scale;
            let update = self.timeline.update(Timestamp(last_time))?;
            if update.all_terminated {
                self.timeline.clear();
                if !forever {
                    tracing::debug!(frames, last_time, "timeline finished");
                    return Ok(PlaybackSummary {
                        frames,
                        last_time,
                        end: PlaybackEnd::TimelineFinished,
                    });
                }
            }

            match self.renderer.render(&self.root)? {
                RenderStatus::Presented => frames += 1,
                RenderStatus::Closed => {
                    tracing::debug!(frames, last_time, "renderer closed");
                    return Ok(PlaybackSummary {
                        frames,
                        last_time,
                        end: PlaybackEnd::RendererClosed,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/director.rs"]
mod tests;
