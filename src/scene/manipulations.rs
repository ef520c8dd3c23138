//! Whole-subtree edits applied in one pre-order walk.

use crate::scene::node::SceneNode;

/// Fully reveal every buildable primitive under `node`.
pub fn set_built(node: &SceneNode) {
    set_build_percent_recursive(node, 1.0);
}

/// Hide every buildable primitive under `node`, ready for a build animation.
pub fn set_unbuilt(node: &SceneNode) {
    set_build_percent_recursive(node, 0.0);
}

fn set_build_percent_recursive(node: &SceneNode, build_percent: f64) {
    node.visit_recursive(&mut |n: &SceneNode| {
        n.set_build_percent(build_percent);
    });
}

pub fn set_z_order_recursive(node: &SceneNode, z_order: i32) {
    node.visit_recursive(&mut |n: &SceneNode| n.set_z_order(z_order));
}

#[cfg(test)]
#[path = "../../tests/unit/scene/manipulations.rs"]
mod tests;
