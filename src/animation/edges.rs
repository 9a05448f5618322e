//! Threshold-crossing detection over a scalar track.
//!
//! Walking the track's keyframe segments finds the exact instants where the
//! signal crosses a threshold, independent of how coarsely the caller steps
//! time. This is what makes edge-triggered attachment frame-rate
//! independent: the pose can be re-evaluated at the true crossing instant
//! instead of the nearest frame boundary.

use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::{HitchError, Result};

/// A threshold crossing of a scalar track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Crossing instant, in the track's ratio domain `[0, 1]`.
    pub time: f32,
    /// `true` when the signal crossed from below the threshold to above it.
    pub rising: bool,
}

/// Scans `track` for threshold crossings inside the interval `(from, to]`.
///
/// Classification rule: a value is *above* the threshold iff it is strictly
/// greater; a sample exactly equal to the threshold counts as below. A
/// crossing exists on a segment iff its two keys classify differently.
/// Linear segments cross at the solution of `v(t) = threshold`; step
/// segments jump at the right key's time (hold-left).
///
/// The interval is half-open so that consecutive queries sharing a boundary
/// never report the same crossing twice. `from == to` yields no edges. One
/// consequence: a crossing at exactly ratio 0 (a first key sitting on the
/// threshold and rising immediately) is reported by no query, since every
/// interval excludes its own `from`; author such a channel to cross
/// strictly after 0, or start it in the attached state.
///
/// Edges come back in increasing time order. `capacity` bounds the result:
/// the scan is part of a real-time step budget, so one more true crossing
/// than fits reports [`HitchError::EdgeOverflow`] instead of silently
/// dropping attach/detach events.
pub fn detect_edges(
    track: &KeyframeTrack<f32>,
    from: f32,
    to: f32,
    threshold: f32,
    capacity: usize,
) -> Result<Vec<Edge>> {
    if capacity == 0 {
        return Err(HitchError::ZeroCapacity);
    }
    if !(0.0..=1.0).contains(&from) || !(0.0..=1.0).contains(&to) || from > to {
        return Err(HitchError::InvalidInterval { from, to });
    }
    if track.is_empty() {
        return Err(HitchError::EmptyTrack {
            context: "trigger channel",
        });
    }

    let mut edges = Vec::new();
    if to <= from {
        // Validated above, so this is the degenerate from == to query.
        return Ok(edges);
    }

    // Outside the key range the track clamps to a constant, so crossings
    // can only occur on the segments between consecutive keys.
    for (ts, vs) in track.times.windows(2).zip(track.values.windows(2)) {
        let (t0, t1) = (ts[0], ts[1]);
        let (v0, v1) = (vs[0], vs[1]);

        let above0 = v0 > threshold;
        let above1 = v1 > threshold;
        if above0 == above1 {
            continue;
        }

        let time = match track.interpolation {
            InterpolationMode::Step => t1,
            InterpolationMode::Linear => t0 + (threshold - v0) / (v1 - v0) * (t1 - t0),
        };
        if time <= from || time > to {
            continue;
        }

        if edges.len() == capacity {
            return Err(HitchError::EdgeOverflow { capacity });
        }
        edges.push(Edge {
            time,
            rising: above1,
        });
    }

    Ok(edges)
}
