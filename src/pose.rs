//! Pose evaluation: sample a clip at a time, compose local transforms into
//! model space.

use std::sync::Arc;

use glam::Affine3A;

use crate::animation::clip::AnimationClip;
use crate::animation::tracks::KeyframeCursor;
use crate::errors::{HitchError, Result};
use crate::skeleton::Skeleton;

/// A joint's local-space transform, relative to its parent joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    pub translation: glam::Vec3,
    pub rotation: glam::Quat,
    pub scale: glam::Vec3,
}

impl JointPose {
    #[must_use]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Per-joint sampling cursors, one per track.
#[derive(Debug, Clone, Default)]
struct JointCursors {
    translation: KeyframeCursor,
    rotation: KeyframeCursor,
    scale: KeyframeCursor,
}

/// Evaluates a clip against a skeleton, producing local poses and
/// model-space joint transforms.
///
/// The evaluator owns one set of scratch buffers and one set of sampling
/// cursors per session. The cursors give nearby queries O(1) segment
/// lookup; the scratch buffers are overwritten by every [`evaluate`] call
/// and are **not** double-buffered, so results must be read (or copied)
/// before the next call. A second concurrent playback stream needs its own
/// evaluator — cursor state assumes the temporal locality of one stream.
///
/// [`evaluate`]: PoseEvaluator::evaluate
#[derive(Debug)]
pub struct PoseEvaluator {
    clip: Arc<AnimationClip>,
    cursors: Vec<JointCursors>,
    locals: Vec<JointPose>,
    models: Vec<Affine3A>,
}

impl PoseEvaluator {
    /// Builds an evaluator for a (skeleton, clip) pair.
    ///
    /// Fails if the clip does not animate exactly the skeleton's joints.
    pub fn new(skeleton: &Skeleton, clip: Arc<AnimationClip>) -> Result<Self> {
        Self::check_parity(skeleton, &clip)?;
        let n = skeleton.num_joints();
        Ok(Self {
            clip,
            cursors: vec![JointCursors::default(); n],
            locals: vec![
                JointPose {
                    translation: glam::Vec3::ZERO,
                    rotation: glam::Quat::IDENTITY,
                    scale: glam::Vec3::ONE,
                };
                n
            ],
            models: vec![Affine3A::IDENTITY; n],
        })
    }

    fn check_parity(skeleton: &Skeleton, clip: &AnimationClip) -> Result<()> {
        if skeleton.num_joints() != clip.num_joints() {
            return Err(HitchError::JointCountMismatch {
                skeleton: skeleton.num_joints(),
                clip: clip.num_joints(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Local-space poses from the most recent [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn locals(&self) -> &[JointPose] {
        &self.locals
    }

    /// Model-space joint transforms from the most recent
    /// [`evaluate`](Self::evaluate). `models()[j]` maps joint `j`'s local
    /// frame to the skeleton root's frame.
    #[must_use]
    pub fn models(&self) -> &[Affine3A] {
        &self.models
    }

    /// Samples every joint's tracks at `time` (seconds) and composes the
    /// local poses into model space along the hierarchy.
    ///
    /// Atomic from the caller's view: any sampling failure aborts the whole
    /// evaluation and no partial result is exposed as valid.
    pub fn evaluate(&mut self, skeleton: &Skeleton, time: f32) -> Result<()> {
        Self::check_parity(skeleton, &self.clip)?;

        for (joint, tracks) in self.clip.joints.iter().enumerate() {
            let cursors = &mut self.cursors[joint];
            self.locals[joint] = JointPose {
                translation: tracks
                    .translation
                    .sample_with_cursor(time, &mut cursors.translation)
                    .ok_or(HitchError::EmptyTrack {
                        context: "joint translation",
                    })?,
                rotation: tracks
                    .rotation
                    .sample_with_cursor(time, &mut cursors.rotation)
                    .ok_or(HitchError::EmptyTrack {
                        context: "joint rotation",
                    })?,
                scale: tracks
                    .scale
                    .sample_with_cursor(time, &mut cursors.scale)
                    .ok_or(HitchError::EmptyTrack {
                        context: "joint scale",
                    })?,
            };
        }

        // Parents precede children (validated by Skeleton::new), so one
        // forward pass composes the whole hierarchy.
        for (joint, &parent) in skeleton.parents().iter().enumerate() {
            let local = self.locals[joint].to_affine();
            self.models[joint] = if parent >= 0 {
                self.models[parent as usize] * local
            } else {
                local
            };
        }

        Ok(())
    }
}
