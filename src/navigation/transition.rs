use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::math::geometry::{lerp_point, quadratic_ease};
use crate::model::BodyID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// The "2D" view: far above the origin, looking straight down.
    TopDown,
    /// The "3D" view: an oblique overview the user can orbit freely.
    Perspective,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::TopDown => ViewMode::Perspective,
            ViewMode::Perspective => ViewMode::TopDown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::TopDown => "2D",
            ViewMode::Perspective => "3D",
        }
    }
}

/// Where the camera is and what it's looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl CameraPose {
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: lerp_point(&self.eye, &other.eye, t),
            target: lerp_point(&self.target, &other.target, t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    FlyToBody(BodyID),
    ViewSwitch(ViewMode),
}

/// A time-boxed camera move. Times are wall-clock seconds, so a transition
/// always finishes on the first frame after its deadline, however few frames
/// were drawn in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub start: CameraPose,
    pub target: CameraPose,
    pub start_time: f64,
    pub duration: f64,
}

impl Transition {
    pub fn new(
        kind: TransitionKind,
        start: CameraPose,
        target: CameraPose,
        start_time: f64,
        duration: f64,
    ) -> Self {
        assert!(
            duration.is_finite() && duration >= 0.0,
            "Transition duration must be finite and non-negative, was {}",
            duration
        );
        Transition {
            kind,
            start,
            target,
            start_time,
            duration,
        }
    }

    /// Fraction of the transition that has elapsed, in [0, 1].
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// The eased pose at `now`. Once complete this is exactly `target`.
    pub fn pose_at(&self, now: f64) -> CameraPose {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.target;
        }
        self.start.lerp(&self.target, quadratic_ease(progress))
    }
}
