use glam::{Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;
use crate::errors::{HitchError, Result};

/// The three pose tracks of a single joint, keyed in seconds.
#[derive(Debug, Clone)]
pub struct JointTracks {
    pub translation: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
}

impl JointTracks {
    /// A static joint resting at the given local pose.
    #[must_use]
    pub fn rest(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation: KeyframeTrack::constant(translation),
            rotation: KeyframeTrack::constant(rotation),
            scale: KeyframeTrack::constant(scale),
        }
    }
}

/// A skeletal animation clip: one [`JointTracks`] per skeleton joint, in
/// joint order.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Seconds. Computed as the latest keyframe time across all tracks.
    pub duration: f32,
    pub joints: Vec<JointTracks>,
}

impl AnimationClip {
    /// Builds a clip, computing its duration from the tracks.
    ///
    /// Every track of every joint must carry at least one keyframe;
    /// an empty track would make pose evaluation fail on every frame, so
    /// it is rejected here instead.
    pub fn new(name: impl Into<String>, joints: Vec<JointTracks>) -> Result<Self> {
        let mut duration = 0.0_f32;
        for tracks in &joints {
            if tracks.translation.is_empty() {
                return Err(HitchError::EmptyTrack {
                    context: "joint translation",
                });
            }
            if tracks.rotation.is_empty() {
                return Err(HitchError::EmptyTrack {
                    context: "joint rotation",
                });
            }
            if tracks.scale.is_empty() {
                return Err(HitchError::EmptyTrack {
                    context: "joint scale",
                });
            }
            duration = duration
                .max(tracks.translation.end_time())
                .max(tracks.rotation.end_time())
                .max(tracks.scale.end_time());
        }

        Ok(Self {
            name: name.into(),
            duration,
            joints,
        })
    }

    /// Extends the computed duration, for clips whose last keyframe falls
    /// short of the intended playback length (rest-pose padding).
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = self.duration.max(duration);
        self
    }

    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }
}
