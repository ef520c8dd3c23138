//! Renderer contract and the flattened draw list handed to it.

pub mod draw;
pub mod recording;

use crate::foundation::error::StagehandResult;
use crate::scene::node::SceneNode;

/// What the playback loop should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    /// The frame was drawn; keep going.
    Presented,
    /// The output went away (window closed, frame budget spent); stop playback.
    Closed,
}

/// Draws the scene once per frame.
///
/// Returning `Closed` or an error stops the driving loop. Renderers should not mutate the
/// scene tree.
pub trait Renderer {
    fn render(&mut self, scene: &SceneNode) -> StagehandResult<RenderStatus>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, scene: &SceneNode) -> StagehandResult<RenderStatus> {
        (**self).render(scene)
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, scene: &SceneNode) -> StagehandResult<RenderStatus> {
        (**self).render(scene)
    }
}
