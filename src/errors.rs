//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`HitchError`] covers all failure modes including:
//! - Track evaluation errors (empty tracks, malformed query intervals)
//! - Edge-buffer overflow during threshold-crossing detection
//! - Skeleton/clip validation errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, HitchError>`.

use thiserror::Error;

/// The main error type for the hitch runtime.
///
/// Every failure is fatal to the simulation step that produced it; nothing
/// is retried internally. The caller decides whether to halt the session or
/// skip the frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HitchError {
    // ========================================================================
    // Track Evaluation Errors
    // ========================================================================
    /// A track with no keyframes was sampled or scanned.
    #[error("Track has no keyframes: {context}")]
    EmptyTrack {
        /// Description of which track was being evaluated
        context: &'static str,
    },

    /// An edge query interval violates `0 <= from <= to <= 1`.
    #[error("Invalid edge query interval: from {from} to {to}")]
    InvalidInterval {
        /// Interval start, as a track ratio
        from: f32,
        /// Interval end, as a track ratio
        to: f32,
    },

    /// More threshold crossings exist in the queried interval than the
    /// bounded edge buffer can hold. Never silently truncated.
    #[error("Edge buffer overflow: more than {capacity} crossings in interval")]
    EdgeOverflow {
        /// The configured buffer capacity
        capacity: usize,
    },

    // ========================================================================
    // Skeleton & Clip Validation Errors
    // ========================================================================
    /// Skeleton construction arrays disagree in length.
    #[error("Skeleton has {names} joint names but {parents} parent indices")]
    MismatchedJointArrays {
        /// Number of joint names supplied
        names: usize,
        /// Number of parent indices supplied
        parents: usize,
    },

    /// A joint's parent index does not precede it in the joint array.
    #[error("Joint {joint} has invalid parent index {parent}")]
    InvalidParent {
        /// The offending joint index
        joint: usize,
        /// Its declared parent index
        parent: i16,
    },

    /// The clip does not animate the same number of joints the skeleton declares.
    #[error("Joint count mismatch: skeleton has {skeleton} joints, clip animates {clip}")]
    JointCountMismatch {
        /// Joints declared by the skeleton
        skeleton: usize,
        /// Joints animated by the clip
        clip: usize,
    },

    /// A joint index is outside the skeleton's joint range.
    #[error("Joint index {index} out of bounds (skeleton has {count} joints)")]
    JointOutOfBounds {
        /// The invalid index
        index: usize,
        /// Joints declared by the skeleton
        count: usize,
    },

    /// Animation-time to track-ratio conversion requires a positive duration.
    #[error("Animation clip duration must be positive")]
    ZeroDuration,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The edge buffer capacity must hold at least one edge.
    #[error("Edge buffer capacity must be at least 1")]
    ZeroCapacity,
}

/// Alias for `Result<T, HitchError>`.
pub type Result<T> = std::result::Result<T, HitchError>;
