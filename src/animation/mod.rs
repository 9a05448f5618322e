pub mod clip;
pub mod edges;
pub mod tracks;
mod values;

pub use clip::{AnimationClip, JointTracks};
pub use edges::{Edge, detect_edges};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
