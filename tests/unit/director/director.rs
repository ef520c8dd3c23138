use super::*;
use crate::foundation::core::Rect;
use crate::render::recording::RecordingRenderer;
use crate::scene::primitive::{Block, Dot};

fn director(root: &SceneNode, renderer: RecordingRenderer) -> Director<RecordingRenderer> {
    Director::new(root.clone(), renderer, DirectorOpts::default()).unwrap()
}

fn dots_and_block() -> (SceneNode, SceneNode, SceneNode) {
    let root = SceneNode::new();
    let a = root.add_primitive("a", Dot::new(1.0)).unwrap();
    let b = root.add_primitive("b", Dot::new(2.0)).unwrap();
    root.add_primitive("block", Block::new(Rect::new(0.0, 0.0, 1.0, 1.0)))
        .unwrap();
    (root, a, b)
}

#[test]
fn build_grows_buildables_in_sequence() {
    let (root, a, b) = dots_and_block();
    let mut director = director(&root, RecordingRenderer::new());

    assert_eq!(director.build(&root).unwrap(), 2);
    assert_eq!(a.build_percent(), Some(0.0));
    assert_eq!(director.timeline().len(), 2);

    let summary = director.play(&mut SteppedTimer::new(0.25)).unwrap();
    assert_eq!(summary.end, PlaybackEnd::TimelineFinished);
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.last_time, 0.75);
    assert_eq!(a.build_percent(), Some(1.0));
    assert_eq!(b.build_percent(), Some(1.0));
    assert!(director.timeline().is_empty());

    let first = &director.renderer().frames()[0];
    let dot_widths: Vec<f64> = first
        .iter()
        .filter(|item| item.label == "dot")
        .map(|item| item.world_bounds.unwrap().width())
        .collect();
    assert_eq!(dot_widths, vec![0.0, 0.0]);
}

#[test]
fn unbuild_shrinks_to_zero() {
    let (root, a, b) = dots_and_block();
    let mut director = director(&root, RecordingRenderer::new().counting_only());
    director
        .unbuild_with(&root, Sequencer::new(0.0, 1.0, 0.0))
        .unwrap();
    director.play(&mut SteppedTimer::new(0.5)).unwrap();
    assert_eq!(a.build_percent(), Some(0.0));
    assert_eq!(b.build_percent(), Some(0.0));
}

#[test]
fn invalid_sequencer_is_rejected_before_scheduling() {
    let (root, a, _) = dots_and_block();
    let mut director = director(&root, RecordingRenderer::new());
    assert!(director.build_with(&root, Sequencer::new(0.0, 0.0, 0.0)).is_err());
    assert!(director.timeline().is_empty());
    assert_eq!(a.build_percent(), Some(1.0));
}

#[test]
fn arrange_lines_nodes_up_around_target() {
    let root = SceneNode::new();
    let target = root.add_empty("target").unwrap();
    target.set_translation(crate::foundation::core::Vec2::new(100.0, 50.0));
    let group = root.add_empty("group").unwrap();
    group.set_translation(crate::foundation::core::Vec2::new(10.0, 0.0));
    let small = group.add_primitive("small", Dot::new(5.0)).unwrap();
    let large = group.add_primitive("large", Dot::new(10.0)).unwrap();

    let mut director = director(&root, RecordingRenderer::new().counting_only());
    let seq = Sequencer::new(0.0, 1.0, 0.0);
    director
        .arrange(&target, &[small.clone(), large.clone()], seq, seq)
        .unwrap();
    assert_eq!(director.timeline().len(), 4);

    let summary = director.play(&mut SteppedTimer::new(0.5)).unwrap();
    assert_eq!(summary.end, PlaybackEnd::TimelineFinished);
    assert_eq!(small.world_origin(), Point::new(85.0, 50.0));
    assert_eq!(large.world_origin(), Point::new(110.0, 50.0));
}

#[test]
fn arranging_nothing_schedules_nothing() {
    let root = SceneNode::new();
    let mut director = director(&root, RecordingRenderer::new());
    let seq = Sequencer::default();
    director.arrange(&root, &[], seq, seq).unwrap();
    assert!(director.timeline().is_empty());
}

#[test]
fn renderer_close_stops_playback() {
    let (root, a, _) = dots_and_block();
    let mut director = director(&root, RecordingRenderer::new().with_max_frames(1));
    director
        .build_with(&root, Sequencer::new(0.0, 10.0, 0.0))
        .unwrap();
    let summary = director.play(&mut SteppedTimer::new(0.5)).unwrap();
    assert_eq!(summary.end, PlaybackEnd::RendererClosed);
    assert_eq!(summary.frames, 1);
    assert!(a.build_percent().unwrap() < 1.0);
    assert!(!director.timeline().is_empty());
}

#[test]
fn play_forever_keeps_rendering_after_finish() {
    let (root, _, _) = dots_and_block();
    let mut director = director(&root, RecordingRenderer::new().with_max_frames(5));
    director
        .build_with(&root, Sequencer::new(0.0, 0.5, 0.0))
        .unwrap();
    let summary = director.play_forever(&mut SteppedTimer::new(0.5)).unwrap();
    assert_eq!(summary.end, PlaybackEnd::RendererClosed);
    assert_eq!(summary.frames, 5);
    assert!(director.timeline().is_empty());
}

#[test]
fn empty_timeline_finishes_without_rendering() {
    let root = SceneNode::new();
    let mut director = director(&root, RecordingRenderer::new());
    let summary = director.play(&mut SteppedTimer::new(1.0)).unwrap();
    assert_eq!(summary.frames, 0);
    assert_eq!(summary.end, PlaybackEnd::TimelineFinished);
}

#[test]
fn time_scale_speeds_up_playback() {
    let (root, _, _) = dots_and_block();
    let opts = DirectorOpts {
        time_scale: 2.0,
        ..DirectorOpts::default()
    };
    let mut director = Director::new(root.clone(), RecordingRenderer::new(), opts).unwrap();
    director
        .build_with(&root, Sequencer::new(0.0, 1.0, 0.0))
        .unwrap();
    let summary = director.play(&mut SteppedTimer::new(0.5)).unwrap();
    // element 1 ends at 2.0, first exceeded at timer 1.5
    assert_eq!(summary.last_time, 3.0);
    assert_eq!(summary.frames, 3);
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = DirectorOpts {
        time_scale: -1.0,
        ..DirectorOpts::default()
    };
    assert!(Director::new(SceneNode::new(), RecordingRenderer::new(), opts).is_err());
}
