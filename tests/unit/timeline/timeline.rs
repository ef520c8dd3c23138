use std::cell::RefCell;

use super::*;
use crate::animation::actions::x_translation;
use crate::animation::anim::{Animation, InterpolatedAnimation, shared};
use crate::animation::ease::Ease;
use crate::foundation::error::StagehandError;
use crate::scene::node::SceneNode;
use crate::schedule::scheduler::{FireOnceScheduler, RepeatScheduler, SchedulerExt};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every lifecycle call as `"<name> <event> <current>"`.
struct Probe {
    name: &'static str,
    log: Log,
}

impl Probe {
    fn shared(name: &'static str, log: &Log) -> SharedAnimation {
        shared(Self {
            name,
            log: Rc::clone(log),
        })
    }

    fn push(&self, event: &str, window: &ScheduleWindow) {
        self.log.borrow_mut().push(format!(
            "{} {event} {}",
            self.name,
            window.current().seconds()
        ));
    }
}

impl Animation for Probe {
    fn activate(&mut self, window: &ScheduleWindow) -> StagehandResult<()> {
        self.push("activate", window);
        Ok(())
    }

    fn animate(&mut self, window: &ScheduleWindow) -> StagehandResult<()> {
        self.push("animate", window);
        Ok(())
    }

    fn terminate(&mut self, window: &ScheduleWindow) -> StagehandResult<()> {
        self.push("terminate", window);
        Ok(())
    }
}

fn fire_once(start: f64, end: f64) -> Rc<dyn Scheduler> {
    FireOnceScheduler::new(start, end).unwrap().shared()
}

fn update(timeline: &mut Timeline, t: f64) -> bool {
    timeline.update(Timestamp(t)).unwrap().all_terminated
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[test]
fn fire_once_translation_scenario() {
    let node = SceneNode::new();
    let mut timeline = Timeline::new();
    timeline.add(
        fire_once(0.0, 1.0),
        shared(InterpolatedAnimation::new(
            Ease::Linear,
            x_translation(0.0, 10.0, &node),
        )),
    );

    assert!(!update(&mut timeline, 0.0));
    assert_eq!(node.translation().x, 0.0);
    assert!(!update(&mut timeline, 0.5));
    assert_eq!(node.translation().x, 5.0);
    assert!(update(&mut timeline, 1.5));
    assert_eq!(node.translation().x, 10.0);
    assert_eq!(timeline.active_count(), 0);
}

#[test]
fn lifecycle_calls_are_ordered() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    timeline.add(fire_once(0.0, 1.0), Probe::shared("a", &log));

    update(&mut timeline, -1.0);
    assert!(drain(&log).is_empty());

    update(&mut timeline, 0.0);
    update(&mut timeline, 0.5);
    update(&mut timeline, 2.0);
    update(&mut timeline, 3.0);
    assert_eq!(
        drain(&log),
        vec!["a activate 0", "a animate 0", "a animate 0.5", "a terminate 0.5"]
    );
}

#[test]
fn terminations_run_before_activations() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    // the successor is registered first but must still see the end state of its predecessor
    timeline.add(fire_once(1.0, 2.0), Probe::shared("next", &log));
    timeline.add(fire_once(0.0, 1.0), Probe::shared("prev", &log));

    update(&mut timeline, 0.5);
    drain(&log);
    update(&mut timeline, 1.5);
    assert_eq!(
        drain(&log),
        vec!["prev terminate 0.5", "next activate 1.5", "next animate 1.5"]
    );
}

#[test]
fn skipped_windows_never_activate() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    timeline.add(fire_once(0.0, 1.0), Probe::shared("a", &log));
    assert!(update(&mut timeline, 5.0));
    assert!(drain(&log).is_empty());
}

#[test]
fn repeated_updates_are_idempotent() {
    let node = SceneNode::new();
    let log = Log::default();
    let mut timeline = Timeline::new();
    timeline.add(
        fire_once(0.0, 2.0),
        shared(InterpolatedAnimation::new(
            Ease::EaseIn,
            x_translation(0.0, 8.0, &node),
        )),
    );
    timeline.add(fire_once(0.0, 2.0), Probe::shared("p", &log));

    update(&mut timeline, 1.0);
    let once = node.translation();
    update(&mut timeline, 1.0);
    assert_eq!(node.translation(), once);
    assert_eq!(
        drain(&log),
        vec!["p activate 1", "p animate 1", "p animate 1"]
    );
}

#[test]
fn repeating_schedules_reactivate() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    let repeat = RepeatScheduler::new(2.0, FireOnceScheduler::new(0.0, 1.0).unwrap()).unwrap();
    timeline.add(Rc::new(repeat), Probe::shared("r", &log));

    update(&mut timeline, 0.5);
    update(&mut timeline, 1.5);
    update(&mut timeline, 2.5);
    assert_eq!(
        drain(&log),
        vec![
            "r activate 0.5",
            "r animate 0.5",
            "r terminate 0.5",
            "r activate 0.5",
            "r animate 0.5",
        ]
    );
}

#[test]
fn empty_timeline_is_terminated() {
    let mut timeline = Timeline::new();
    assert!(timeline.is_empty());
    assert!(update(&mut timeline, 0.0));
}

#[test]
fn clear_forgets_entries_and_tracking() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    let anim = Probe::shared("a", &log);
    timeline.add(fire_once(0.0, 1.0), Rc::clone(&anim));
    update(&mut timeline, 0.5);
    assert_eq!(timeline.active_count(), 1);

    timeline.clear();
    assert_eq!(timeline.len(), 0);
    assert_eq!(timeline.active_count(), 0);

    // re-adding the same animation activates it afresh
    timeline.add(fire_once(0.0, 1.0), anim);
    drain(&log);
    update(&mut timeline, 0.5);
    assert_eq!(drain(&log), vec!["a activate 0.5", "a animate 0.5"]);
}

#[test]
fn shared_animation_is_tracked_once() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    let anim = Probe::shared("s", &log);
    timeline.add(fire_once(0.0, 1.0), Rc::clone(&anim));
    timeline.add(fire_once(0.0, 3.0), anim);
    assert_eq!(timeline.len(), 2);

    update(&mut timeline, 0.5);
    assert_eq!(
        drain(&log),
        vec!["s activate 0.5", "s animate 0.5", "s animate 0.5"]
    );
    assert_eq!(timeline.active_count(), 1);
}

struct AlwaysUnbounded;

impl Scheduler for AlwaysUnbounded {
    fn schedule_state(&self, timestamp: Timestamp) -> ScheduleState {
        ScheduleState::active(ScheduleWindow::unbounded(timestamp))
    }
}

#[test]
fn animation_errors_propagate() {
    let mut timeline = Timeline::new();
    timeline.add(
        Rc::new(AlwaysUnbounded),
        shared(InterpolatedAnimation::new(Ease::Linear, |_v: f64| {})),
    );
    let err = timeline.update(Timestamp(0.0)).unwrap_err();
    assert!(matches!(err, StagehandError::Animation(_)));
}

struct ActiveWithoutWindow;

impl Scheduler for ActiveWithoutWindow {
    fn schedule_state(&self, _timestamp: Timestamp) -> ScheduleState {
        ScheduleState::active_without_window()
    }
}

#[test]
fn active_state_without_window_is_a_schedule_error() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    timeline.add(Rc::new(ActiveWithoutWindow), Probe::shared("broken", &log));
    let err = timeline.update(Timestamp(0.0)).unwrap_err();
    assert!(matches!(err, StagehandError::Schedule(_)));
    assert!(drain(&log).is_empty());
}

#[test]
fn pending_entries_keep_the_timeline_running() {
    let log = Log::default();
    let mut timeline = Timeline::new();
    timeline.add(fire_once(5.0, 6.0), Probe::shared("later", &log));
    assert!(!update(&mut timeline, 0.0));
    assert!(drain(&log).is_empty());
}
