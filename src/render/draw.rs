use crate::foundation::core::{Affine, Rect};
use crate::scene::node::SceneNode;

/// One entry of a flattened scene: what to draw and where.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawItem {
    /// Primitive kind, as reported by [`Primitive::label`](crate::scene::primitive::Primitive::label).
    pub label: String,
    pub z_order: i32,
    /// Local-to-world transform of the owning node.
    pub transform: Affine,
    /// World-space box of the primitive, when it is boundable.
    pub world_bounds: Option<Rect>,
}

/// Flatten `scene` into owned draw items, ascending z order, pre-order within a z level.
pub fn draw_list(scene: &SceneNode) -> Vec<DrawItem> {
    let mut items = Vec::new();
    scene.render_layered(|primitive, transform, z_order| {
        let world_bounds = primitive
            .as_boundable()
            .map(|b| transform.transform_rect_bbox(b.local_bounds()));
        items.push(DrawItem {
            label: primitive.label().to_owned(),
            z_order,
            transform,
            world_bounds,
        });
    });
    items
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
