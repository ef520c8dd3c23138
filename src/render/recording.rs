use crate::foundation::error::StagehandResult;
use crate::render::draw::{DrawItem, draw_list};
use crate::render::{RenderStatus, Renderer};
use crate::scene::node::SceneNode;

/// In-memory renderer for tests and headless playback.
///
/// Counts frames, optionally keeps each frame's draw list, and reports
/// [`RenderStatus::Closed`] once its frame budget is spent.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    max_frames: Option<usize>,
    capture: bool,
    presented: usize,
    frames: Vec<Vec<DrawItem>>,
}

impl RecordingRenderer {
    /// Unlimited renderer that keeps every draw list.
    pub fn new() -> Self {
        Self {
            capture: true,
            ..Self::default()
        }
    }

    /// Present at most `max_frames` frames, then close.
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Count frames without keeping their draw lists.
    pub fn counting_only(mut self) -> Self {
        self.capture = false;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.presented
    }

    /// Captured draw lists, oldest first. Empty when capture is off.
    pub fn frames(&self) -> &[Vec<DrawItem>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawItem]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &SceneNode) -> StagehandResult<RenderStatus> {
        if self.max_frames.is_some_and(|max| self.presented >= max) {
            return Ok(RenderStatus::Closed);
        }
        if self.capture {
            self.frames.push(draw_list(scene));
        }
        self.presented += 1;
        tracing::trace!(frame = self.presented, "frame presented");
        Ok(RenderStatus::Presented)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
