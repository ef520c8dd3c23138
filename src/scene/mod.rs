//! Scene tree: nodes with local transforms, owned primitives, and capability traits.

pub mod manipulations;
pub mod node;
pub mod primitive;
