use crate::animation::values::Interpolatable;

/// How values between two keyframes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Interpolate between the surrounding keyframes.
    Linear,
    /// Hold the left keyframe's value until the next keyframe time.
    Step,
}

/// How many keys a cursor scans linearly before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Last-segment cache for [`KeyframeTrack::sample_with_cursor`].
///
/// Playback queries are temporally coherent: consecutive sample times almost
/// always land in the same segment or an adjacent one, so remembering the
/// last segment index makes sampling O(1) in the common case. Correctness
/// never depends on the cursor's contents; a stale or out-of-range cursor
/// only costs a binary search.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// A keyframed signal: parallel `times`/`values` arrays plus an
/// interpolation mode. Sampling clamps outside the key range.
///
/// The attachment trigger channel is a `KeyframeTrack<f32>` authored over
/// the normalized ratio domain `[0, 1]`; joint pose tracks use absolute
/// seconds. The track itself is agnostic to the time unit.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track from parallel key arrays.
    ///
    /// Mismatched array lengths are truncated to the shorter one, with a
    /// warning; sampling must never index past either array.
    #[must_use]
    pub fn new(mut times: Vec<f32>, mut values: Vec<T>, interpolation: InterpolationMode) -> Self {
        if times.len() != values.len() {
            log::warn!(
                "keyframe arrays disagree ({} times, {} values); truncating",
                times.len(),
                values.len()
            );
            let keys = times.len().min(values.len());
            times.truncate(keys);
            values.truncate(keys);
        }
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Builds a single-key constant track.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::new(vec![0.0], vec![value], InterpolationMode::Step)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the track at `time` with a one-off binary search.
    ///
    /// Returns `None` for an empty track; the caller decides whether that
    /// is an error (it is, everywhere in this crate).
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        // partition_point returns the first index with t > time, i.e. the
        // segment's right neighbor.
        let next_idx = self.times.partition_point(|&t| t <= time);
        let index = next_idx.saturating_sub(1);
        Some(self.sample_segment(index, time))
    }

    /// Samples the track at `time`, reusing `cursor` as a segment cache.
    ///
    /// Strategy: scan up to `MAX_SCAN_OFFSET` keys forward or backward
    /// from the cached segment (covers normal playback in either
    /// direction), then fall back to a global binary search for large
    /// jumps such as scrubbing or a loop reset.
    #[must_use]
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        if len == 0 {
            return None;
        }
        if len == 1 {
            return Some(self.values[0]);
        }

        let i = cursor.last_index;
        // A cursor left over from another track may be out of range.
        let t_curr = *self.times.get(i).unwrap_or(&self.times[0]);

        let found_index = if time >= t_curr {
            // Forward scan from the cached segment.
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }
                // time >= times[i] already holds, so only the right bound
                // of [times[idx], times[idx + 1]) needs checking.
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward scan (reverse playback).
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let index = match found_index {
            Some(idx) => idx,
            None => {
                // Large jump: binary search.
                let next_idx = self.times.partition_point(|&t| t <= time);
                next_idx.saturating_sub(1)
            }
        };
        cursor.last_index = index;
        Some(self.sample_segment(index, time))
    }

    /// Evaluates the segment starting at `index` for the given time.
    fn sample_segment(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            // At or past the last keyframe: clamp.
            return self.values[len - 1];
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                T::interpolate_linear(self.values[index], self.values[next_idx], t)
            }
        }
    }
}
