use crate::errors::{HitchError, Result};

/// A flat skeletal hierarchy: joint names plus parent indices.
///
/// Joints are stored parent-before-child so that model-space composition is
/// a single forward pass over the array; root joints carry parent `-1`.
/// The bind-pose data lives in the [`AnimationClip`](crate::AnimationClip)
/// tracks, not here.
#[derive(Debug, Clone)]
pub struct Skeleton {
    joint_names: Vec<String>,
    parents: Vec<i16>,
}

impl Skeleton {
    /// Builds a skeleton, validating that every joint's parent precedes it.
    pub fn new(joint_names: Vec<String>, parents: Vec<i16>) -> Result<Self> {
        if joint_names.len() != parents.len() {
            return Err(HitchError::MismatchedJointArrays {
                names: joint_names.len(),
                parents: parents.len(),
            });
        }
        for (joint, &parent) in parents.iter().enumerate() {
            if parent >= 0 && parent as usize >= joint {
                return Err(HitchError::InvalidParent { joint, parent });
            }
        }
        Ok(Self {
            joint_names,
            parents,
        })
    }

    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.parents.len()
    }

    #[must_use]
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    #[must_use]
    pub fn parents(&self) -> &[i16] {
        &self.parents
    }

    /// Locates a joint by name substring.
    ///
    /// Returns the first joint whose name contains `fragment`. A fragment
    /// that matches nothing falls back to joint 0 with a warning, so a
    /// renamed rig degrades visibly instead of failing the session.
    #[must_use]
    pub fn find_joint(&self, fragment: &str) -> usize {
        match self
            .joint_names
            .iter()
            .position(|name| name.contains(fragment))
        {
            Some(index) => index,
            None => {
                log::warn!("No joint name contains \"{fragment}\"; falling back to joint 0");
                0
            }
        }
    }
}
