use super::*;
use crate::foundation::core::Rect;
use crate::scene::primitive::{Block, Dot};

fn scene() -> (SceneNode, SceneNode, SceneNode) {
    let root = SceneNode::new();
    let group = root.add_empty("group").unwrap();
    let a = group.add_primitive("a", Dot::new(1.0)).unwrap();
    let b = root.add_primitive("b", Dot::new(2.0)).unwrap();
    root.add_primitive("block", Block::new(Rect::new(0.0, 0.0, 1.0, 1.0)))
        .unwrap();
    (root, a, b)
}

#[test]
fn unbuilt_then_built_round_trips_every_buildable() {
    let (root, a, b) = scene();
    set_unbuilt(&root);
    assert_eq!(a.build_percent(), Some(0.0));
    assert_eq!(b.build_percent(), Some(0.0));

    set_built(&root);
    assert_eq!(a.build_percent(), Some(1.0));
    assert_eq!(b.build_percent(), Some(1.0));
}

#[test]
fn manipulations_only_touch_the_given_subtree() {
    let (root, a, b) = scene();
    set_unbuilt(&root.get("group").unwrap());
    assert_eq!(a.build_percent(), Some(0.0));
    assert_eq!(b.build_percent(), Some(1.0));
}

#[test]
fn z_order_reaches_every_descendant() {
    let (root, a, b) = scene();
    set_z_order_recursive(&root, 7);
    let mut orders = Vec::new();
    root.visit_recursive(&mut |n: &SceneNode| orders.push(n.z_order()));
    assert_eq!(orders.len(), 5);
    assert!(orders.iter().all(|&z| z == 7));
    assert_eq!(a.z_order(), 7);
    assert_eq!(b.z_order(), 7);
}
