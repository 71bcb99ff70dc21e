//! Camera-and-animation coordination: who gets to move the camera, when the
//! orbits advance, and what the pointer is pointing at.

pub mod camera;
pub mod camera_controller;
pub mod coordinator;
pub mod feedback;
pub mod picker;
pub mod transition;

pub use camera::OrbitCamera;
pub use camera_controller::{CameraMode, CameraTransitionController, FlyTo};
pub use coordinator::{InteractionCoordinator, SelectionState};
pub use feedback::{CursorStyle, UiFeedback};
pub use picker::{pick, pick_ray, pixel_to_ndc, PickHit};
pub use transition::{CameraPose, Transition, TransitionKind, ViewMode};
