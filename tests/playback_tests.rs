//! Playback Controller Tests
//!
//! Tests for:
//! - Interval tracking (time / previous_time) across updates
//! - Loop wrap-around and non-looping clamp
//! - Speed scaling and pause
//! - Scrubbing without spanning an interval

use hitch::playback::PlaybackController;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn update_spans_an_interval() {
    let mut controller = PlaybackController::new();
    controller.update(10.0, 1.5);

    assert!(approx(controller.previous_time(), 0.0));
    assert!(approx(controller.time(), 1.5));

    controller.update(10.0, 2.0);
    assert!(approx(controller.previous_time(), 1.5));
    assert!(approx(controller.time(), 3.5));
}

#[test]
fn looping_wraps_past_duration() {
    let mut controller = PlaybackController::new();
    controller.set_time(9.0);
    controller.update(10.0, 2.5);

    assert!(approx(controller.previous_time(), 9.0));
    assert!(approx(controller.time(), 1.5));
    assert!(controller.wrapped());

    // The flag reflects only the latest step.
    controller.update(10.0, 1.0);
    assert!(!controller.wrapped());
}

#[test]
fn reverse_step_inside_the_clip_is_not_a_wrap() {
    let mut controller = PlaybackController::new();
    controller.set_speed(-1.0);
    controller.set_time(8.0);
    controller.update(10.0, 2.0);

    // previous_time > time, yet no seam was crossed.
    assert!(approx(controller.time(), 6.0));
    assert!(controller.previous_time() > controller.time());
    assert!(!controller.wrapped());
}

#[test]
fn non_looping_clamps_at_duration() {
    let mut controller = PlaybackController::new();
    controller.set_looping(false);
    controller.update(10.0, 25.0);

    assert!(approx(controller.time(), 10.0));

    // Further updates degenerate to an empty interval.
    controller.update(10.0, 1.0);
    assert!(approx(controller.previous_time(), 10.0));
    assert!(approx(controller.time(), 10.0));
}

#[test]
fn speed_scales_and_pause_freezes() {
    let mut controller = PlaybackController::new();
    controller.set_speed(2.0);
    controller.update(10.0, 1.0);
    assert!(approx(controller.time(), 2.0));

    controller.set_playing(false);
    controller.update(10.0, 1.0);
    assert!(approx(controller.previous_time(), 2.0));
    assert!(approx(controller.time(), 2.0));
}

#[test]
fn reverse_playback_wraps_negative() {
    let mut controller = PlaybackController::new();
    controller.set_speed(-1.0);
    controller.set_time(1.0);
    controller.update(10.0, 2.0);

    assert!(approx(controller.time(), 9.0));
    assert!(controller.wrapped());
}

#[test]
fn set_time_spans_no_interval() {
    let mut controller = PlaybackController::new();
    controller.set_time(9.0);
    controller.update(10.0, 3.0);
    assert!(controller.wrapped());

    controller.set_time(8.0);

    assert!(approx(controller.previous_time(), 8.0));
    assert!(approx(controller.time(), 8.0));
    assert!(!controller.wrapped());
}

#[test]
fn reset_rewinds_cleanly() {
    let mut controller = PlaybackController::new();
    controller.update(10.0, 7.0);
    controller.reset();

    assert!(approx(controller.time(), 0.0));
    assert!(approx(controller.previous_time(), 0.0));
}
