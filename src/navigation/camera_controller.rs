use nalgebra::Vector3;

use super::camera::OrbitCamera;
use super::transition::{CameraPose, Transition, TransitionKind, ViewMode};
use crate::model::Body;
use crate::options::CameraOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraMode {
    /// The user drives the camera (if the view mode allows it).
    Free,
    /// A transition drives the camera; user input is ignored.
    Transitioning(Transition),
}

/// What `start_fly_to` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyTo {
    Started,
    /// A transition was already running, so it was dropped instead and the
    /// camera was handed back to the user where it stood.
    Cancelled,
}

/// Sole owner of the camera. Every change to the camera's pose goes through
/// here, whether it comes from a transition or from free-form input (which
/// is only let through while `free_form_enabled` says so).
pub struct CameraTransitionController {
    camera: OrbitCamera,
    mode: CameraMode,
    view_mode: ViewMode,
    options: CameraOptions,
}

impl CameraTransitionController {
    pub fn new(options: &CameraOptions, view_mode: ViewMode) -> Self {
        let camera = OrbitCamera::new(options.preset(view_mode), options);
        let mut controller = CameraTransitionController {
            camera,
            mode: CameraMode::Free,
            view_mode,
            options: options.clone(),
        };
        controller.sync_free_form();
        controller
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Handle for the window to feed raw input to. Whether that input moves
    /// anything is still decided here, through `free_form_enabled`.
    pub(crate) fn device_camera(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.mode, CameraMode::Transitioning(_))
    }

    pub fn active_transition(&self) -> Option<&Transition> {
        match &self.mode {
            CameraMode::Free => None,
            CameraMode::Transitioning(t) => Some(t),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Free-form control is allowed only when nothing else is driving the
    /// camera and we're not pinned in the top-down view.
    pub fn free_form_enabled(&self) -> bool {
        matches!(self.mode, CameraMode::Free) && self.view_mode == ViewMode::Perspective
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Where a fly-to toward `body` would end up, starting from the current
    /// eye: on the line from the eye to the body, a fixed number of body
    /// radii short of its center, looking at the center.
    pub fn fly_to_pose(&self, body: &Body) -> CameraPose {
        let center = body.world_position();
        let start_eye = self.camera.pose().eye;
        let approach = (center - start_eye)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vector3::z());
        let standoff = body.radius() * self.options.fly_to_distance_factor;

        CameraPose {
            eye: center - approach * standoff,
            target: center,
        }
    }

    /// Starts flying toward `body`, unless a transition is already running,
    /// in which case that transition is cancelled and nothing new starts.
    pub fn start_fly_to(&mut self, body: &Body, now: f64) -> FlyTo {
        if self.cancel().is_some() {
            log::info!("Fly-to {} requested mid-transition; cancelled instead", body.name());
            return FlyTo::Cancelled;
        }

        let target = self.fly_to_pose(body);
        self.begin(TransitionKind::FlyToBody(body.id), target, now);
        log::info!("Flying to {}", body.name());
        FlyTo::Started
    }

    /// Starts moving to the preset for `mode`. Always restarts, dropping any
    /// transition in flight.
    pub fn start_view_switch(&mut self, mode: ViewMode, now: f64) {
        if let Some(old) = self.cancel() {
            log::debug!("View switch preempts {:?}", old.kind);
        }
        self.view_mode = mode;
        let target = self.options.preset(mode);
        self.begin(TransitionKind::ViewSwitch(mode), target, now);
        log::info!("Switching to {} view", mode.label());
    }

    /// Drops the active transition, leaving the camera where it is. Returns
    /// the dropped transition, if there was one.
    pub fn cancel(&mut self) -> Option<Transition> {
        let old = std::mem::replace(&mut self.mode, CameraMode::Free);
        self.sync_free_form();
        match old {
            CameraMode::Free => None,
            CameraMode::Transitioning(t) => Some(t),
        }
    }

    /// Moves the camera along the active transition. On the frame the
    /// transition completes, the camera snaps exactly onto the target, control
    /// returns to `Free`, and the finished transition's kind is returned.
    pub fn tick(&mut self, now: f64) -> Option<TransitionKind> {
        let (pose, done, kind) = match &self.mode {
            CameraMode::Free => return None,
            CameraMode::Transitioning(t) => (t.pose_at(now), t.is_complete(now), t.kind),
        };

        self.camera.set_pose(pose);
        if !done {
            return None;
        }

        self.mode = CameraMode::Free;
        self.sync_free_form();
        log::info!("Camera transition {:?} finished", kind);
        Some(kind)
    }

    fn begin(&mut self, kind: TransitionKind, target: CameraPose, now: f64) {
        let transition = Transition::new(
            kind,
            self.camera.pose(),
            target,
            now,
            self.options.transition_seconds,
        );
        self.mode = CameraMode::Transitioning(transition);
        self.sync_free_form();
    }

    fn sync_free_form(&mut self) {
        let enabled = self.free_form_enabled();
        self.camera.set_free_form(enabled);
    }
}
