use super::*;

#[test]
fn single_bound_is_rejected() {
    let now = Timestamp(0.5);
    assert!(ScheduleWindow::new(Some(Timestamp(0.0)), None, now).is_err());
    assert!(ScheduleWindow::new(None, Some(Timestamp(1.0)), now).is_err());
    assert!(!ScheduleWindow::new(None, None, now).unwrap().is_finite());
    assert!(
        ScheduleWindow::new(Some(Timestamp(0.0)), Some(Timestamp(1.0)), now)
            .unwrap()
            .is_finite()
    );
}

#[test]
fn percent_complete_hits_endpoints() {
    let at = |t: f64| ScheduleWindow::finite(Timestamp(2.0), Timestamp(6.0), Timestamp(t));
    assert_eq!(at(2.0).percent_complete().unwrap(), 0.0);
    assert_eq!(at(4.0).percent_complete().unwrap(), 0.5);
    assert_eq!(at(6.0).percent_complete().unwrap(), 1.0);
}

#[test]
fn percent_complete_requires_finite_window() {
    let w = ScheduleWindow::unbounded(Timestamp(3.0));
    let err = w.percent_complete().unwrap_err();
    assert!(err.to_string().contains("not bounded"));
}

#[test]
fn instantaneous_window_is_detected_and_not_divided() {
    let w = ScheduleWindow::finite(Timestamp(1.0), Timestamp(1.0), Timestamp(1.0));
    assert!(w.is_instantaneous());
    assert!(w.percent_complete().is_err());
    assert!(!ScheduleWindow::unbounded(Timestamp(1.0)).is_instantaneous());
}

#[test]
fn offset_moves_every_present_field() {
    let w = ScheduleWindow::finite(Timestamp(1.0), Timestamp(2.0), Timestamp(1.5));
    let shifted = w.offset_seconds(10.0);
    assert_eq!(shifted.first_active(), Some(Timestamp(11.0)));
    assert_eq!(shifted.last_active(), Some(Timestamp(12.0)));
    assert_eq!(shifted.current(), Timestamp(11.5));
    // original untouched
    assert_eq!(w.current(), Timestamp(1.5));

    let open = ScheduleWindow::unbounded(Timestamp(1.0)).offset_seconds(-1.0);
    assert_eq!(open.current(), Timestamp(0.0));
    assert_eq!(open.first_active(), None);
    assert_eq!(open.last_active(), None);
}

#[test]
fn percent_complete_is_monotonic() {
    let mut prev = f64::NEG_INFINITY;
    for i in 0..=20 {
        let t = 3.0 + f64::from(i) * 0.1;
        let p = ScheduleWindow::finite(Timestamp(3.0), Timestamp(5.0), Timestamp(t))
            .percent_complete()
            .unwrap();
        assert!(p >= prev);
        prev = p;
    }
}
