pub mod animator;
pub mod body;
pub mod registry;

pub use animator::{AnimationRunState, OrbitAnimator};
pub use body::{BeltInfo, Body, BodyID, BodyInfo, HitSphere, OrbitTransform, RingInfo};
pub use registry::{BodyRegistry, BodySpec};
