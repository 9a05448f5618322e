//! Edge Detection Tests
//!
//! Tests for:
//! - No-op (degenerate) query intervals
//! - Strictly increasing edge ordering
//! - Threshold boundary rule (equal counts as below)
//! - Half-open interval semantics across consecutive queries
//! - Bounded buffer overflow reporting
//! - Interval/track validation errors

use hitch::animation::{InterpolationMode, KeyframeTrack, detect_edges};
use hitch::errors::HitchError;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// The reference analog channel: 0 on [0, 0.4], linear ramp to 1 over
/// [0.4, 0.6], 1 on [0.6, 1].
fn ramp_channel() -> KeyframeTrack<f32> {
    KeyframeTrack::new(
        vec![0.0, 0.4, 0.6, 1.0],
        vec![0.0, 0.0, 1.0, 1.0],
        InterpolationMode::Linear,
    )
}

/// A step square wave with `n` transitions, evenly spaced inside (0, 1].
fn square_channel(transitions: usize) -> KeyframeTrack<f32> {
    let keys = transitions + 1;
    let times: Vec<f32> = (0..keys).map(|i| i as f32 / transitions as f32).collect();
    let values: Vec<f32> = (0..keys).map(|i| (i % 2) as f32).collect();
    KeyframeTrack::new(times, values, InterpolationMode::Step)
}

// ============================================================================
// Degenerate Intervals
// ============================================================================

#[test]
fn empty_interval_yields_no_edges() {
    let channel = ramp_channel();
    for t in [0.0, 0.25, 0.5, 0.77, 1.0] {
        let edges = detect_edges(&channel, t, t, 0.5, 8).unwrap();
        assert!(edges.is_empty(), "Expected no edges at from==to=={t}");
    }
}

// ============================================================================
// Crossing Instants & Direction
// ============================================================================

#[test]
fn ramp_crosses_once_at_midpoint() {
    let channel = ramp_channel();
    let edges = detect_edges(&channel, 0.0, 1.0, 0.5, 8).unwrap();

    assert_eq!(edges.len(), 1);
    assert!(edges[0].rising);
    assert!(approx(edges[0].time, 0.5), "Expected 0.5, got {}", edges[0].time);
}

#[test]
fn falling_edge_direction() {
    let channel = KeyframeTrack::new(
        vec![0.0, 0.2, 0.8, 1.0],
        vec![1.0, 1.0, 0.0, 0.0],
        InterpolationMode::Linear,
    );
    let edges = detect_edges(&channel, 0.0, 1.0, 0.5, 8).unwrap();

    assert_eq!(edges.len(), 1);
    assert!(!edges[0].rising);
    assert!(approx(edges[0].time, 0.5));
}

#[test]
fn step_channel_crosses_at_right_key() {
    let channel = KeyframeTrack::new(
        vec![0.0, 0.3, 0.7],
        vec![0.0, 1.0, 0.0],
        InterpolationMode::Step,
    );
    let edges = detect_edges(&channel, 0.0, 1.0, 0.5, 8).unwrap();

    assert_eq!(edges.len(), 2);
    assert!(edges[0].rising && approx(edges[0].time, 0.3));
    assert!(!edges[1].rising && approx(edges[1].time, 0.7));
}

#[test]
fn edges_strictly_increasing() {
    let channel = square_channel(9);
    let edges = detect_edges(&channel, 0.0, 1.0, 0.5, 16).unwrap();

    assert_eq!(edges.len(), 9);
    for pair in edges.windows(2) {
        assert!(pair[0].time < pair[1].time, "Edges out of order: {pair:?}");
    }
    // Directions alternate, starting with the first rise.
    for (i, edge) in edges.iter().enumerate() {
        assert_eq!(edge.rising, i % 2 == 0);
    }
}

// ============================================================================
// Threshold Boundary
// ============================================================================

#[test]
fn value_equal_to_threshold_is_below() {
    // A plateau exactly at the threshold never counts as above, so a step
    // onto it produces no edge…
    let onto_plateau = KeyframeTrack::new(
        vec![0.0, 0.5],
        vec![0.2, 0.5],
        InterpolationMode::Step,
    );
    assert!(detect_edges(&onto_plateau, 0.0, 1.0, 0.5, 8).unwrap().is_empty());

    // …while stepping any amount past it does.
    let past_plateau = KeyframeTrack::new(
        vec![0.0, 0.5],
        vec![0.2, 0.500_01],
        InterpolationMode::Step,
    );
    let edges = detect_edges(&past_plateau, 0.0, 1.0, 0.5, 8).unwrap();
    assert_eq!(edges.len(), 1);
    assert!(edges[0].rising);
}

#[test]
fn crossing_at_ratio_zero_is_unreachable() {
    // A first key sitting exactly on the threshold and rising immediately
    // solves to a crossing instant of 0, which every query interval
    // excludes.
    let channel = KeyframeTrack::new(vec![0.0, 1.0], vec![0.5, 1.0], InterpolationMode::Linear);
    assert!(detect_edges(&channel, 0.0, 1.0, 0.5, 8).unwrap().is_empty());
}

// ============================================================================
// Half-Open Interval Semantics
// ============================================================================

#[test]
fn consecutive_queries_never_double_count() {
    let channel = ramp_channel();

    // The crossing at 0.5 belongs to the query whose interval ends there.
    let first = detect_edges(&channel, 0.4, 0.5, 0.5, 8).unwrap();
    let second = detect_edges(&channel, 0.5, 1.0, 0.5, 8).unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

// ============================================================================
// Bounded Buffer
// ============================================================================

#[test]
fn overflow_is_an_error_not_truncation() {
    let channel = square_channel(9);

    let err = detect_edges(&channel, 0.0, 1.0, 0.5, 8).unwrap_err();
    assert_eq!(err, HitchError::EdgeOverflow { capacity: 8 });

    // The same interval with one more slot succeeds in full.
    let edges = detect_edges(&channel, 0.0, 1.0, 0.5, 9).unwrap();
    assert_eq!(edges.len(), 9);
}

#[test]
fn zero_capacity_rejected() {
    let channel = ramp_channel();
    assert_eq!(
        detect_edges(&channel, 0.0, 1.0, 0.5, 0).unwrap_err(),
        HitchError::ZeroCapacity
    );
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn malformed_intervals_rejected() {
    let channel = ramp_channel();

    for (from, to) in [(0.6, 0.4), (-0.1, 0.5), (0.5, 1.1)] {
        let err = detect_edges(&channel, from, to, 0.5, 8).unwrap_err();
        assert!(
            matches!(err, HitchError::InvalidInterval { .. }),
            "Expected InvalidInterval for ({from}, {to}), got {err:?}"
        );
    }
}

#[test]
fn empty_channel_rejected() {
    let channel: KeyframeTrack<f32> =
        KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    let err = detect_edges(&channel, 0.0, 1.0, 0.5, 8).unwrap_err();
    assert!(matches!(err, HitchError::EmptyTrack { .. }));
}
