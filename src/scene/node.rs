use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::rc::{Rc, Weak};

use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::foundation::math::{is_invertible, rects_close, union_bounds};
use crate::scene::primitive::{Buildable, Primitive};

/// Relative tolerance used when checking that a re-rooted subtree kept its world bounds.
pub const BOUNDS_TOLERANCE: f64 = 1e-9;

struct NodeData {
    primitive: Option<Box<dyn Primitive>>,
    transform: Affine,
    z_order: i32,
    children: Vec<(String, SceneNode)>,
    parent: Weak<RefCell<NodeData>>,
}

/// Owning handle to a node of the scene tree.
///
/// Parents own their children; children refer back to their parent weakly, so ownership
/// only ever flows from the root down. Cloning the handle shares the node.
#[derive(Clone)]
pub struct SceneNode(Rc<RefCell<NodeData>>);

/// Non-owning handle to a scene node, as captured by animation actions.
#[derive(Clone, Default)]
pub struct WeakSceneNode(Weak<RefCell<NodeData>>);

impl WeakSceneNode {
    /// The node, if it is still alive.
    pub fn upgrade(&self) -> Option<SceneNode> {
        self.0.upgrade().map(SceneNode)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakSceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSceneNode")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode {
    /// Detached node with no primitive, identity transform, and z order 0.
    pub fn new() -> Self {
        Self::with_z_order(0)
    }

    pub fn with_z_order(z_order: i32) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            primitive: None,
            transform: Affine::IDENTITY,
            z_order,
            children: Vec::new(),
            parent: Weak::new(),
        })))
    }

    /// Detached node owning `primitive`.
    pub fn with_primitive(primitive: impl Primitive + 'static) -> Self {
        Self::from_boxed(Box::new(primitive), 0)
    }

    pub fn from_boxed(primitive: Box<dyn Primitive>, z_order: i32) -> Self {
        let node = Self::with_z_order(z_order);
        node.0.borrow_mut().primitive = Some(primitive);
        node
    }

    pub fn downgrade(&self) -> WeakSceneNode {
        WeakSceneNode(Rc::downgrade(&self.0))
    }

    /// `true` when both handles refer to the same node.
    pub fn ptr_eq(&self, other: &SceneNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn parent(&self) -> Option<SceneNode> {
        self.0.borrow().parent.upgrade().map(SceneNode)
    }

    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    // ---- transform & ordering ----

    /// Local transform, relative to the parent.
    pub fn transform(&self) -> Affine {
        self.0.borrow().transform
    }

    pub fn set_transform(&self, transform: Affine) {
        self.0.borrow_mut().transform = transform;
    }

    pub fn update_transform(&self, f: impl FnOnce(Affine) -> Affine) {
        let mut data = self.0.borrow_mut();
        data.transform = f(data.transform);
    }

    /// Translation part of the local transform.
    pub fn translation(&self) -> Vec2 {
        self.transform().translation()
    }

    /// Replace the translation part of the local transform, keeping the linear part.
    pub fn set_translation(&self, translation: Vec2) {
        self.update_transform(|t| t.with_translation(translation));
    }

    pub fn z_order(&self) -> i32 {
        self.0.borrow().z_order
    }

    pub fn set_z_order(&self, z_order: i32) {
        self.0.borrow_mut().z_order = z_order;
    }

    // ---- structure ----

    /// Attach `node` under `name`.
    ///
    /// Fails when the name is taken, when `node` already has a parent, or when attaching
    /// would create a cycle.
    pub fn add(&self, name: impl Into<String>, node: SceneNode) -> StagehandResult<SceneNode> {
        let name = name.into();
        if self.contains(&name) {
            return Err(StagehandError::scene(format!(
                "child with name {name} already present"
            )));
        }
        if node.has_parent() {
            return Err(StagehandError::scene(format!(
                "node added as {name} already has a parent"
            )));
        }
        if self.is_self_or_descendant_of(&node) {
            return Err(StagehandError::scene(format!(
                "adding {name} would make a node its own ancestor"
            )));
        }

        node.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push((name, node.clone()));
        Ok(node)
    }

    /// Attach a fresh empty node that inherits this node's z order.
    pub fn add_empty(&self, name: impl Into<String>) -> StagehandResult<SceneNode> {
        self.add(name, SceneNode::with_z_order(self.z_order()))
    }

    /// Attach a fresh node owning `primitive`, inheriting this node's z order.
    pub fn add_primitive(
        &self,
        name: impl Into<String>,
        primitive: impl Primitive + 'static,
    ) -> StagehandResult<SceneNode> {
        self.add(name, SceneNode::from_boxed(Box::new(primitive), self.z_order()))
    }

    /// Detach and return the child called `name`.
    pub fn remove(&self, name: &str) -> StagehandResult<SceneNode> {
        let mut data = self.0.borrow_mut();
        let Some(idx) = data.children.iter().position(|(n, _)| n == name) else {
            return Err(StagehandError::scene(format!(
                "child with name {name} not present"
            )));
        };
        let (_, child) = data.children.remove(idx);
        drop(data);
        child.0.borrow_mut().parent = Weak::new();
        Ok(child)
    }

    /// Detach every child.
    pub fn clear(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for (_, child) in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().children.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> StagehandResult<SceneNode> {
        self.try_get(name).ok_or_else(|| {
            StagehandError::scene(format!("child with name {name} not present"))
        })
    }

    pub fn try_get(&self, name: &str) -> Option<SceneNode> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
    }

    /// Children in insertion order.
    pub fn children(&self) -> Vec<(String, SceneNode)> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    fn child_handles(&self) -> Vec<SceneNode> {
        self.0
            .borrow()
            .children
            .iter()
            .map(|(_, c)| c.clone())
            .collect()
    }

    fn is_self_or_descendant_of(&self, other: &SceneNode) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if node.ptr_eq(other) {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    /// Pre-order traversal of this subtree, children in insertion order.
    pub fn visit_recursive(&self, visitor: &mut dyn FnMut(&SceneNode)) {
        visitor(self);
        for child in self.child_handles() {
            child.visit_recursive(visitor);
        }
    }

    // ---- primitive access ----

    pub fn has_primitive(&self) -> bool {
        self.0.borrow().primitive.is_some()
    }

    /// Run `f` on the primitive, if any.
    pub fn inspect_primitive<R>(&self, f: impl FnOnce(&dyn Primitive) -> R) -> Option<R> {
        let data = self.0.borrow();
        data.primitive.as_deref().map(|p| f(p))
    }

    pub fn inspect_primitive_mut<R>(&self, f: impl FnOnce(&mut dyn Primitive) -> R) -> Option<R> {
        let mut data = self.0.borrow_mut();
        data.primitive.as_deref_mut().map(|p| f(p))
    }

    /// Run `f` on the primitive's buildable capability, if it has one.
    pub fn with_buildable_mut<R>(&self, f: impl FnOnce(&mut dyn Buildable) -> R) -> Option<R> {
        let mut data = self.0.borrow_mut();
        data.primitive
            .as_deref_mut()
            .and_then(|p| p.as_buildable_mut())
            .map(|b| f(b))
    }

    pub fn build_percent(&self) -> Option<f64> {
        let data = self.0.borrow();
        data.primitive
            .as_deref()
            .and_then(|p| p.as_buildable())
            .map(|b| b.build_percent())
    }

    /// Set the build percent; returns `false` when the primitive is not buildable.
    pub fn set_build_percent(&self, build_percent: f64) -> bool {
        self.with_buildable_mut(|b| b.set_build_percent(build_percent))
            .is_some()
    }

    // ---- coordinate spaces ----

    /// Transform from this node's local space to world space: ancestors' transforms
    /// applied outermost, root first.
    pub fn local_to_world_transform(&self) -> Affine {
        let mut result = self.transform();
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            result = node.transform() * result;
            cursor = node.parent();
        }
        result
    }

    pub fn world_to_local_transform(&self) -> StagehandResult<Affine> {
        let l2w = self.local_to_world_transform();
        if !is_invertible(l2w) {
            return Err(StagehandError::scene(
                "local-to-world transform is singular and cannot be inverted",
            ));
        }
        Ok(l2w.inverse())
    }

    /// Transform from this node's local space into `other`'s local space.
    pub fn local_to_local_transform(&self, other: &SceneNode) -> StagehandResult<Affine> {
        Ok(other.world_to_local_transform()? * self.local_to_world_transform())
    }

    /// World position of this node's local origin.
    pub fn world_origin(&self) -> Point {
        self.local_to_world_transform() * Point::ORIGIN
    }

    // ---- bounds ----

    /// Primitive bounds in local space; `None` without a boundable primitive.
    pub fn local_bounds(&self) -> Option<Rect> {
        let data = self.0.borrow();
        data.primitive
            .as_deref()
            .and_then(|p| p.as_boundable())
            .map(|b| b.local_bounds())
    }

    /// World-space bounding box of this node's own primitive.
    pub fn world_bounds(&self) -> Option<Rect> {
        let local = self.local_bounds()?;
        Some(self.local_to_world_transform().transform_rect_bbox(local))
    }

    /// Union of this node's world box and every descendant's.
    pub fn world_bounds_recursive(&self) -> Option<Rect> {
        self.child_handles()
            .iter()
            .fold(self.world_bounds(), |acc, child| {
                union_bounds(acc, child.world_bounds_recursive())
            })
    }

    // ---- origin mutations ----

    /// Move this node so that its origin lands on world `(x, y)`.
    ///
    /// Children move with it; the drawn position changes.
    pub fn translate_to_world_coordinate(&self, x: f64, y: f64) -> StagehandResult<()> {
        let target = Point::new(x, y);
        let in_parent = match self.parent() {
            Some(parent) => parent.world_to_local_transform()? * target,
            None => target,
        };
        self.set_translation(in_parent.to_vec2());
        Ok(())
    }

    /// Make world `(x, y)` this node's local origin without moving anything on screen.
    ///
    /// Every direct child is compensated by the inverse offset. The recursive world bounds
    /// are compared before and after; if they moved (for example because this node's own
    /// primitive shifted outside its children's box) the change is rolled back and an
    /// error returned.
    pub fn set_world_origin(&self, x: f64, y: f64) -> StagehandResult<()> {
        let before = self.world_bounds_recursive();
        let delta = (self.world_to_local_transform()? * Point::new(x, y)).to_vec2();

        let saved = self.transform();
        let children = self.child_handles();
        let saved_children: Vec<Affine> = children.iter().map(SceneNode::transform).collect();

        self.set_transform(saved.pre_translate(delta));
        for child in &children {
            child.update_transform(|t| t.then_translate(-delta));
        }

        let after = self.world_bounds_recursive();
        let preserved = match (before, after) {
            (Some(a), Some(b)) => rects_close(a, b, BOUNDS_TOLERANCE),
            (None, None) => true,
            _ => false,
        };
        if !preserved {
            self.set_transform(saved);
            for (child, t) in children.iter().zip(saved_children) {
                child.set_transform(t);
            }
            return Err(StagehandError::scene(format!(
                "set_world_origin({x}, {y}) would change world bounds from {before:?} to {after:?}"
            )));
        }

        tracing::trace!(x, y, dx = delta.x, dy = delta.y, "world origin moved");
        Ok(())
    }

    /// Move the origin to the centre of the recursive world bounds.
    pub fn set_origin_to_midpoint(&self) -> StagehandResult<()> {
        let Some(bounds) = self.world_bounds_recursive() else {
            return Err(StagehandError::scene(
                "cannot center the origin of a subtree without bounds",
            ));
        };
        let center = bounds.center();
        self.set_world_origin(center.x, center.y)?;

        let origin = self.world_origin();
        let scale = center.x.abs().max(center.y.abs()).max(1.0);
        if (origin - center).hypot() > BOUNDS_TOLERANCE * scale {
            return Err(StagehandError::scene(format!(
                "origin landed at {origin:?}, expected {center:?}"
            )));
        }
        Ok(())
    }

    // ---- rendering ----

    /// Flatten this subtree into `(primitive, world transform)` pairs ordered by ascending
    /// z order; ties keep pre-order. Nodes without a primitive are skipped.
    ///
    /// The visitor must not mutate the scene tree.
    pub fn render(&self, mut visitor: impl FnMut(&dyn Primitive, Affine)) {
        self.render_layered(|primitive, transform, _| visitor(primitive, transform));
    }

    /// [`render`](Self::render), also passing each node's z order.
    pub(crate) fn render_layered(&self, mut visitor: impl FnMut(&dyn Primitive, Affine, i32)) {
        let mut nodes = Vec::new();
        self.visit_recursive(&mut |n: &SceneNode| nodes.push(n.clone()));
        nodes.sort_by_key(SceneNode::z_order);

        for node in nodes {
            let transform = node.local_to_world_transform();
            let data = node.0.borrow();
            if let Some(primitive) = data.primitive.as_deref() {
                visitor(primitive, transform, data.z_order);
            }
        }
    }

    /// Indented listing of each node's recursive bounds and world origin.
    pub fn dump_bounds(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, "root", 0);
        out
    }

    fn dump_into(&self, out: &mut String, name: &str, depth: usize) {
        let origin = self.world_origin();
        let _ = write!(out, "{:indent$}{name}: ", "", indent = depth * 4);
        match self.world_bounds_recursive() {
            Some(b) => {
                let _ = write!(
                    out,
                    "bounds ({:.3}, {:.3}, {:.3}, {:.3})",
                    b.x0,
                    b.y0,
                    b.width(),
                    b.height()
                );
            }
            None => out.push_str("bounds none"),
        }
        let _ = writeln!(out, "  origin ({:.3}, {:.3})", origin.x, origin.y);
        for (child_name, child) in self.children() {
            child.dump_into(out, &child_name, depth + 1);
        }
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        let names: Vec<&str> = data.children.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("SceneNode")
            .field("primitive", &data.primitive.as_deref().map(|p| p.label()))
            .field("transform", &data.transform)
            .field("z_order", &data.z_order)
            .field("children", &names)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
