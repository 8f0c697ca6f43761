use super::*;

fn feed(tracker: &mut DirectionTracker, offsets: &[f64]) -> Vec<ScrollDirection> {
    offsets.iter().filter_map(|&y| tracker.sample(y).direction).collect()
}

// =============================================================
// clamp_offset
// =============================================================

#[test]
fn clamp_offset_floors_negative_and_nan() {
    assert_eq!(clamp_offset(-12.0), 0);
    assert_eq!(clamp_offset(f64::NAN), 0);
    assert_eq!(clamp_offset(0.4), 0);
    assert_eq!(clamp_offset(80.6), 81);
    assert_eq!(clamp_offset(f64::INFINITY), u32::MAX);
}

// =============================================================
// DirectionTracker
// =============================================================

#[test]
fn small_steps_accumulate_into_a_flip() {
    let mut tracker = DirectionTracker::new(0.0);
    assert_eq!(feed(&mut tracker, &[3.0, 6.0, 9.0, 12.0]), vec![ScrollDirection::Down]);
    assert_eq!(tracker.direction(), ScrollDirection::Down);
}

#[test]
fn movement_inside_band_never_flips() {
    let mut tracker = DirectionTracker::new(0.0);
    assert!(feed(&mut tracker, &[2.0, 4.0, 6.0, 8.0]).is_empty());
    assert_eq!(tracker.direction(), ScrollDirection::Unknown);
}

#[test]
fn exactly_band_width_does_not_flip() {
    let mut tracker = DirectionTracker::new(0.0);
    assert!(feed(&mut tracker, &[10.0]).is_empty());
    assert_eq!(feed(&mut tracker, &[11.0]), vec![ScrollDirection::Down]);
}

#[test]
fn reversal_is_measured_from_turning_point() {
    let mut tracker = DirectionTracker::new(0.0);
    feed(&mut tracker, &[20.0, 200.0]);
    // Back 9px from 200 stays down; 11px flips up.
    assert!(feed(&mut tracker, &[191.0]).is_empty());
    assert_eq!(feed(&mut tracker, &[189.0]), vec![ScrollDirection::Up]);
}

#[test]
fn continued_movement_publishes_offset_only() {
    let mut tracker = DirectionTracker::new(0.0);
    tracker.sample(40.0);
    let sample = tracker.sample(90.0);
    assert_eq!(sample, DirectionSample { offset: 90, direction: None });
}

#[test]
fn negative_overscroll_reports_zero_offset() {
    let mut tracker = DirectionTracker::new(0.0);
    assert_eq!(tracker.sample(-30.0).offset, 0);
}

// =============================================================
// ThresholdTracker
// =============================================================

#[test]
fn threshold_is_checked_eagerly() {
    assert!(ThresholdTracker::new(DEFAULT_SCROLL_THRESHOLD_PX, 120.0).is_scrolled());
    assert!(!ThresholdTracker::new(DEFAULT_SCROLL_THRESHOLD_PX, 50.0).is_scrolled());
}

#[test]
fn threshold_publishes_only_on_change() {
    let mut tracker = ThresholdTracker::new(DEFAULT_SCROLL_THRESHOLD_PX, 0.0);
    assert_eq!(tracker.sample(30.0), None);
    assert_eq!(tracker.sample(51.0), Some(true));
    assert_eq!(tracker.sample(400.0), None);
    assert_eq!(tracker.sample(50.0), Some(false));
}

#[test]
fn threshold_updates_follow_committed_frames() {
    let mut gate = FrameGate::default();
    let mut tracker = ThresholdTracker::new(DEFAULT_SCROLL_THRESHOLD_PX, 0.0);
    let mut published = Vec::new();
    let mut frames = 0;

    // A burst of events at 80 schedules one frame.
    let scheduled: Vec<bool> = (0..3).map(|_| gate.request()).collect();
    assert_eq!(scheduled, vec![true, false, false]);
    gate.begin_frame();
    frames += 1;
    published.extend(tracker.sample(80.0));

    // Next burst ends at 40.
    assert!(gate.request());
    assert!(!gate.request());
    gate.begin_frame();
    frames += 1;
    published.extend(tracker.sample(40.0));

    assert_eq!(published, vec![true, false]);
    assert_eq!(frames, 2);
}

// =============================================================
// FrameGate / header
// =============================================================

#[test]
fn gate_reopens_after_frame() {
    let mut gate = FrameGate::default();
    assert!(gate.request());
    assert!(gate.is_pending());
    gate.begin_frame();
    assert!(!gate.is_pending());
    assert!(gate.request());
}

#[test]
fn header_hides_only_when_scrolling_down_past_offset() {
    assert!(should_hide_header(ScrollDirection::Down, 150));
    assert!(!should_hide_header(ScrollDirection::Down, HEADER_HIDE_OFFSET_PX));
    assert!(!should_hide_header(ScrollDirection::Up, 500));
    assert!(!should_hide_header(ScrollDirection::Unknown, 500));
}
