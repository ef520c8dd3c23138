//! Ready-made actions for [`InterpolatedAnimation`](crate::animation::anim::InterpolatedAnimation).
//!
//! Each returns an `FnMut(f64)` that maps the eased progress value onto scene state. Actions
//! that target a node hold it weakly: once the node is dropped they do nothing.

use crate::animation::anim::Lerp;
use crate::foundation::core::Vec2;
use crate::foundation::math::lerp_f64;
use crate::scene::node::{SceneNode, WeakSceneNode};

/// Drive the x component of `node`'s local translation from `x0` to `x1`.
pub fn x_translation(x0: f64, x1: f64, node: &SceneNode) -> impl FnMut(f64) + use<> {
    let node = node.downgrade();
    move |v| {
        with_live(&node, "x_translation", |n| {
            let y = n.translation().y;
            n.set_translation(Vec2::new(lerp_f64(x0, x1, v), y));
        });
    }
}

/// Drive the y component of `node`'s local translation from `y0` to `y1`.
pub fn y_translation(y0: f64, y1: f64, node: &SceneNode) -> impl FnMut(f64) + use<> {
    let node = node.downgrade();
    move |v| {
        with_live(&node, "y_translation", |n| {
            let x = n.translation().x;
            n.set_translation(Vec2::new(x, lerp_f64(y0, y1, v)));
        });
    }
}

pub fn translation(from: Vec2, to: Vec2, node: &SceneNode) -> impl FnMut(f64) + use<> {
    let node = node.downgrade();
    move |v| {
        with_live(&node, "translation", |n| {
            n.set_translation(<Vec2 as Lerp>::lerp(&from, &to, v));
        });
    }
}

/// Feed the progress value straight into the primitive's build percent.
pub fn build_percent(node: &SceneNode) -> impl FnMut(f64) + use<> {
    let node = node.downgrade();
    move |v| {
        with_live(&node, "build_percent", |n| {
            if !n.set_build_percent(v) {
                tracing::warn!(?n, "build_percent action targets a node that is not buildable");
            }
        });
    }
}

/// Interpolate any [`Lerp`] value and hand it to `sink`.
pub fn lerp_value<T, F>(from: T, to: T, mut sink: F) -> impl FnMut(f64)
where
    T: Lerp,
    F: FnMut(T),
{
    move |v| sink(T::lerp(&from, &to, v))
}

fn with_live(node: &WeakSceneNode, action: &'static str, f: impl FnOnce(&SceneNode)) {
    match node.upgrade() {
        Some(n) => f(&n),
        None => tracing::trace!(action, "target node dropped; skipping"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/actions.rs"]
mod tests;
