use std::fmt;

use crate::foundation::core::Rect;

/// Reports its bounds in its own local coordinates.
pub trait Boundable {
    fn local_bounds(&self) -> Rect;
}

/// Supports a progressive 0..1 reveal, e.g. the drawn fraction of a line's length.
pub trait Buildable {
    fn build_percent(&self) -> f64;
    fn set_build_percent(&mut self, build_percent: f64);
}

/// A visual element owned by a scene node.
///
/// Capabilities are queried explicitly: each `as_*` method returns `None` unless the
/// concrete primitive supports that capability.
pub trait Primitive: fmt::Debug {
    /// Short kind name used by renderers and diagnostics.
    fn label(&self) -> &str;

    fn as_boundable(&self) -> Option<&dyn Boundable> {
        None
    }

    fn as_buildable(&self) -> Option<&dyn Buildable> {
        None
    }

    fn as_buildable_mut(&mut self) -> Option<&mut dyn Buildable> {
        None
    }
}

/// Draws nothing; a zero-sized box at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Empty;

impl Boundable for Empty {
    fn local_bounds(&self) -> Rect {
        Rect::ZERO
    }
}

impl Primitive for Empty {
    fn label(&self) -> &str {
        "empty"
    }

    fn as_boundable(&self) -> Option<&dyn Boundable> {
        Some(self)
    }
}

/// Filled disc centred on the origin whose radius grows with its build percent.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    radius: f64,
    build_percent: f64,
}

impl Dot {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            build_percent: 1.0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius currently drawn.
    pub fn visible_radius(&self) -> f64 {
        self.radius * self.build_percent
    }
}

impl Boundable for Dot {
    fn local_bounds(&self) -> Rect {
        let r = self.visible_radius();
        Rect::new(-r, -r, r, r)
    }
}

impl Buildable for Dot {
    fn build_percent(&self) -> f64 {
        self.build_percent
    }

    fn set_build_percent(&mut self, build_percent: f64) {
        self.build_percent = build_percent;
    }
}

impl Primitive for Dot {
    fn label(&self) -> &str {
        "dot"
    }

    fn as_boundable(&self) -> Option<&dyn Boundable> {
        Some(self)
    }

    fn as_buildable(&self) -> Option<&dyn Buildable> {
        Some(self)
    }

    fn as_buildable_mut(&mut self) -> Option<&mut dyn Buildable> {
        Some(self)
    }
}

/// Axis-aligned box in local coordinates. Boundable, not buildable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub rect: Rect,
}

impl Block {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

impl Boundable for Block {
    fn local_bounds(&self) -> Rect {
        self.rect
    }
}

impl Primitive for Block {
    fn label(&self) -> &str {
        "block"
    }

    fn as_boundable(&self) -> Option<&dyn Boundable> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/primitive.rs"]
mod tests;
