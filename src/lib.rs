#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Hitch — frame-accurate attachment of objects to animated skeletal joints.
//!
//! A scalar *trigger track* authored alongside an animation decides when an
//! object should rigidly follow a joint. The [`AttachmentSystem`] keeps the
//! object's transform numerically consistent across attach/detach
//! transitions, either by sampling the track once per frame
//! ([`TrackMethod::Sampling`]) or by detecting the exact threshold-crossing
//! instants inside each step ([`TrackMethod::Triggering`]), which makes the
//! captured transforms independent of the simulation step size.

pub mod animation;
pub mod attachment;
pub mod errors;
pub mod playback;
pub mod pose;
pub mod skeleton;

pub use animation::{AnimationClip, Edge, InterpolationMode, JointTracks, KeyframeCursor, KeyframeTrack, detect_edges};
pub use attachment::{AttachmentConfig, AttachmentState, AttachmentSystem, TrackMethod};
pub use errors::{HitchError, Result};
pub use playback::PlaybackController;
pub use pose::{JointPose, PoseEvaluator};
pub use skeleton::Skeleton;
