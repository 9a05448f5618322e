//! The attachment state machine.
//!
//! Owns the attached/detached flag and the attached object's transform in
//! two reference frames, and keeps the pair consistent across transitions
//! driven by a scalar trigger channel.

use std::sync::Arc;

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;
use crate::animation::edges::{Edge, detect_edges};
use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};
use crate::errors::{HitchError, Result};
use crate::playback::PlaybackController;
use crate::pose::PoseEvaluator;
use crate::skeleton::Skeleton;

/// How the trigger channel is read each step.
///
/// The two methods share all state; dispatch is a match per step, not a
/// trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackMethod {
    /// Sample the channel's instantaneous value once per step. Simple, but
    /// a crossing between two frames is applied a frame late, at frame-
    /// boundary joint positions.
    Sampling,
    /// Detect the exact crossing instants inside the step's interval and
    /// re-evaluate the pose at each one. Frame-rate independent; the
    /// captured transforms are exact regardless of step size.
    Triggering,
}

/// Construction parameters for an [`AttachmentSystem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Substring locating the attachment joint by name.
    pub joint_name: String,
    /// Initial world-space position of the object while detached.
    pub initial_position: [f32; 3],
    pub method: TrackMethod,
    /// Classification threshold: a channel value strictly greater counts
    /// as attached.
    pub threshold: f32,
    /// Bound on threshold crossings processed per step.
    pub max_edges: usize,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            joint_name: String::new(),
            initial_position: [0.0, 0.1, 0.3],
            method: TrackMethod::Triggering,
            threshold: 0.5,
            max_edges: 8,
        }
    }
}

/// The object's attachment state, mutated only by
/// [`AttachmentSystem::update`].
///
/// Exactly one of `world_transform` / `local_transform` is live at any
/// instant: the world transform while detached, the joint-relative local
/// transform while attached. The other holds the value captured at the most
/// recent transition and is used to reconstruct the live one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentState {
    /// Whether the object currently follows the attachment joint rigidly.
    pub attached: bool,
    /// The joint whose model-space transform defines the attachment frame.
    /// Fixed for the session.
    pub attach_joint: usize,
    /// Object pose in world space; authoritative while detached.
    pub world_transform: Affine3A,
    /// Object pose relative to the attachment joint; authoritative while
    /// attached.
    pub local_transform: Affine3A,
}

/// Frame-accurate attachment driver for one playback stream.
///
/// Each [`update`](Self::update) advances the clock, reads the trigger
/// channel with the configured [`TrackMethod`], and maintains the
/// [`AttachmentState`] so the object neither jumps nor drifts across
/// attach/detach transitions.
#[derive(Debug)]
pub struct AttachmentSystem {
    skeleton: Arc<Skeleton>,
    clip: Arc<AnimationClip>,
    channel: KeyframeTrack<f32>,
    channel_cursor: KeyframeCursor,

    controller: PlaybackController,
    evaluator: PoseEvaluator,

    method: TrackMethod,
    threshold: f32,
    max_edges: usize,
    initial_world: Affine3A,
    state: AttachmentState,
}

impl AttachmentSystem {
    /// Wires a skeleton, a clip and a trigger channel into an attachment
    /// session.
    ///
    /// Validates up front everything the per-step hot path relies on: a
    /// positive clip duration (time-to-ratio conversion divides by it),
    /// clip/skeleton joint parity, a non-empty channel and a usable edge
    /// budget.
    pub fn new(
        skeleton: Arc<Skeleton>,
        clip: Arc<AnimationClip>,
        channel: KeyframeTrack<f32>,
        config: &AttachmentConfig,
    ) -> Result<Self> {
        if clip.duration <= 0.0 {
            return Err(HitchError::ZeroDuration);
        }
        if channel.is_empty() {
            return Err(HitchError::EmptyTrack {
                context: "trigger channel",
            });
        }
        if config.max_edges == 0 {
            return Err(HitchError::ZeroCapacity);
        }

        let evaluator = PoseEvaluator::new(&skeleton, Arc::clone(&clip))?;
        let attach_joint = skeleton.find_joint(&config.joint_name);
        let initial_world = Affine3A::from_translation(Vec3::from(config.initial_position));

        Ok(Self {
            skeleton,
            clip,
            channel,
            channel_cursor: KeyframeCursor::default(),
            controller: PlaybackController::new(),
            evaluator,
            method: config.method,
            threshold: config.threshold,
            max_edges: config.max_edges,
            initial_world,
            state: AttachmentState {
                attached: false,
                attach_joint,
                world_transform: initial_world,
                local_transform: Affine3A::IDENTITY,
            },
        })
    }

    #[must_use]
    pub fn state(&self) -> &AttachmentState {
        &self.state
    }

    #[must_use]
    pub fn attached(&self) -> bool {
        self.state.attached
    }

    /// Object pose in world space, as of the most recent update.
    #[must_use]
    pub fn world_transform(&self) -> Affine3A {
        self.state.world_transform
    }

    /// Model-space joint transforms as of the most recent update, for
    /// rendering the posture.
    #[must_use]
    pub fn models(&self) -> &[Affine3A] {
        self.evaluator.models()
    }

    #[must_use]
    pub fn method(&self) -> TrackMethod {
        self.method
    }

    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    /// Switches the channel-reading method and resets the session; the two
    /// methods disagree about intermediate state, so carrying state across
    /// a switch would be meaningless.
    pub fn set_method(&mut self, method: TrackMethod) {
        if self.method != method {
            self.method = method;
            self.reset();
        }
    }

    /// Rewinds the clock and restores the initial attachment state.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.channel_cursor = KeyframeCursor::default();
        self.state.attached = false;
        self.state.world_transform = self.initial_world;
        self.state.local_transform = Affine3A::IDENTITY;
    }

    /// Advances the session by `dt` seconds.
    ///
    /// Any evaluation failure is fatal to the step and reported upward;
    /// nothing is retried. Under [`TrackMethod::Triggering`], edges already
    /// applied before a mid-step failure stay applied.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        self.controller.update(self.clip.duration, dt);

        match self.method {
            TrackMethod::Sampling => self.update_sampling()?,
            TrackMethod::Triggering => self.update_triggering()?,
        }

        // While attached the joint-relative transform is authoritative;
        // refresh the world transform from this frame's joint pose. While
        // detached the object stays where it was released.
        if self.state.attached {
            self.state.world_transform =
                self.evaluator.models()[self.state.attach_joint] * self.state.local_transform;
        }

        Ok(())
    }

    /// Reads the channel's instantaneous value at the current time.
    fn update_sampling(&mut self) -> Result<()> {
        let time = self.controller.time();
        self.evaluator.evaluate(&self.skeleton, time)?;

        // Channels have a unit-length domain; they are sampled with a
        // ratio computed from the duration of the clip they accompany.
        let ratio = time / self.clip.duration;
        let value = self
            .channel
            .sample_with_cursor(ratio, &mut self.channel_cursor)
            .ok_or(HitchError::EmptyTrack {
                context: "trigger channel",
            })?;

        let previously_attached = self.state.attached;
        self.state.attached = value > self.threshold;

        // On a fresh attach, freeze the object's current world pose into
        // the joint's frame.
        if self.state.attached && !previously_attached {
            self.attach_to_joint();
        }

        Ok(())
    }

    /// Walks the channel for threshold crossings since the previous step
    /// and applies each transition at its exact instant.
    fn update_triggering(&mut self) -> Result<()> {
        let duration = self.clip.duration;
        let from = self.controller.previous_time() / duration;
        let to = self.controller.time() / duration;

        let edges = self.gather_edges(from, to)?;
        self.apply_edges(&edges)?;

        // Final pose for this frame's render, even when no edges occurred.
        self.evaluator.evaluate(&self.skeleton, self.controller.time())
    }

    /// Collects the crossings the step actually traversed, in application
    /// order, bounded by `max_edges` across the whole step.
    ///
    /// `from > to` alone does not mean the clock wrapped a loop: reverse
    /// playback produces it too, and scanning `(from, 1] + (0, to]` there
    /// would report crossings from intervals the step never touched. Only
    /// the controller's wrap flag splits the scan at the seam; a backward
    /// traversal re-crosses its edges in reverse order with the directions
    /// inverted.
    fn gather_edges(&self, from: f32, to: f32) -> Result<Vec<Edge>> {
        let threshold = self.threshold;
        let budget = self.max_edges;

        let edges = if self.controller.wrapped() {
            if from > to {
                // Forward across the seam: scan to the end of the channel
                // domain, then from its start.
                let mut head = detect_edges(&self.channel, from, 1.0, threshold, budget)?;
                head.extend(detect_edges(&self.channel, 0.0, to, threshold, budget)?);
                head
            } else {
                // Backward across the seam: descend to the channel start,
                // then from its end down to the landing time.
                let mut head = reverse_edges(detect_edges(
                    &self.channel,
                    0.0,
                    from,
                    threshold,
                    budget,
                )?);
                head.extend(reverse_edges(detect_edges(
                    &self.channel,
                    to,
                    1.0,
                    threshold,
                    budget,
                )?));
                head
            }
        } else if from <= to {
            detect_edges(&self.channel, from, to, threshold, budget)?
        } else {
            // Plain backward step.
            reverse_edges(detect_edges(&self.channel, to, from, threshold, budget)?)
        };

        // The split halves of a wrapped step share one budget.
        if edges.len() > budget {
            return Err(HitchError::EdgeOverflow { capacity: budget });
        }
        Ok(edges)
    }

    fn apply_edges(&mut self, edges: &[Edge]) -> Result<()> {
        for edge in edges {
            self.state.attached = edge.rising;

            // Re-sample the pose at the exact crossing instant. Sampling is
            // cursor-cached, so these intermediate evaluations stay cheap.
            self.evaluator
                .evaluate(&self.skeleton, edge.time * self.clip.duration)?;

            if edge.rising {
                self.attach_to_joint();
            } else {
                // Compute where the object is released.
                self.state.world_transform =
                    self.evaluator.models()[self.state.attach_joint] * self.state.local_transform;
            }
            log::debug!(
                "{} at channel time {:.4}",
                if edge.rising { "attached" } else { "detached" },
                edge.time
            );
        }

        Ok(())
    }

    /// Captures the object's world pose relative to the attachment joint's
    /// current model-space transform.
    fn attach_to_joint(&mut self) {
        let joint = self.evaluator.models()[self.state.attach_joint];
        self.state.local_transform = joint.inverse() * self.state.world_transform;
    }
}

/// Turns an ascending edge list into its backward-traversal equivalent:
/// last crossing first, each one re-crossed in the opposite direction.
fn reverse_edges(mut edges: Vec<Edge>) -> Vec<Edge> {
    edges.reverse();
    for edge in &mut edges {
        edge.rising = !edge.rising;
    }
    edges
}
