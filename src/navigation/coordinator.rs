use nalgebra::{Point2, Vector2};

use super::camera::OrbitCamera;
use super::camera_controller::{CameraTransitionController, FlyTo};
use super::feedback::{CursorStyle, UiFeedback};
use super::picker::{self, pixel_to_ndc};
use super::transition::{TransitionKind, ViewMode};
use crate::model::{AnimationRunState, Body, BodyID, BodyRegistry, OrbitAnimator};
use crate::options::{InterfaceOptions, Options};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub selected: Option<BodyID>,
    pub info_panel_visible: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    // Set while the primary button is held
    pressed_at: Option<Point2<f32>>,
    hovered: Option<BodyID>,
}

/// Turns input events into calls on the picker, animator and camera, and
/// reports back through a `UiFeedback` sink.
///
/// Owns everything it coordinates, so each piece of state has exactly one
/// owner: body transforms belong to the animator (via the registry), the
/// camera belongs to the transition controller, and selection lives here.
pub struct InteractionCoordinator<F> {
    registry: BodyRegistry,
    animator: OrbitAnimator,
    camera: CameraTransitionController,
    feedback: F,
    selection: SelectionState,
    pointer: PointerState,
    interface: InterfaceOptions,
}

impl<F: UiFeedback> InteractionCoordinator<F> {
    pub fn new(registry: BodyRegistry, options: &Options, mut feedback: F) -> Self {
        let animator = OrbitAnimator::new(AnimationRunState {
            running: options.animation.running,
            speed_factor: options.animation.speed_factor,
        });
        let camera = CameraTransitionController::new(&options.camera, options.interface.initial_view);

        feedback.set_play_state(animator.is_running());
        feedback.set_cursor(CursorStyle::Grab);

        InteractionCoordinator {
            registry,
            animator,
            camera,
            feedback,
            selection: SelectionState::default(),
            pointer: PointerState::default(),
            interface: options.interface.clone(),
        }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn animator(&self) -> &OrbitAnimator {
        &self.animator
    }

    pub fn camera(&self) -> &CameraTransitionController {
        &self.camera
    }

    pub(crate) fn device_camera(&mut self) -> &mut OrbitCamera {
        self.camera.device_camera()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn hovered(&self) -> Option<&Body> {
        self.pointer.hovered.map(|id| self.registry.get(id))
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// One logical frame: orbits first, then the camera. The caller draws
    /// after this returns.
    pub fn advance_frame(&mut self, now: f64) -> Option<TransitionKind> {
        self.animator.tick(&mut self.registry);
        self.camera.tick(now)
    }

    pub fn body_under(&self, pixel: &Point2<f32>) -> Option<&Body> {
        let camera = self.camera.camera();
        let ndc = pixel_to_ndc(pixel, &camera.viewport());
        picker::pick(camera, &self.registry, &ndc)
    }

    pub fn pointer_moved(&mut self, pixel: Point2<f32>) {
        if self.pointer.pressed_at.is_some() {
            return;
        }
        self.update_hover(&pixel);
    }

    pub fn pointer_pressed(&mut self, pixel: Point2<f32>) {
        self.pointer.pressed_at = Some(pixel);
        self.feedback.set_cursor(CursorStyle::Grabbing);
    }

    /// Ends a press. A release close to where the press started is a click;
    /// anything further was a drag and selects nothing.
    pub fn pointer_released(&mut self, pixel: Point2<f32>, now: f64) {
        let pressed_at = match self.pointer.pressed_at.take() {
            Some(p) => p,
            None => return,
        };

        // Hover was frozen during the press, so catch up with the pointer
        self.update_hover(&pixel);

        if (pixel - pressed_at).norm() <= self.interface.click_slop {
            self.click(pixel, now);
        }
    }

    pub fn click(&mut self, pixel: Point2<f32>, now: f64) {
        let id = match self.body_under(&pixel) {
            Some(body) => body.id,
            None => {
                self.hide_info_panel();
                return;
            }
        };

        if self.selection.selected == Some(id) && self.selection.info_panel_visible {
            self.hide_info_panel();
            return;
        }

        let at = self.offset_from_pointer(&pixel);
        self.select(id, at, now);
    }

    /// A body was chosen from the menu by its display name. Unknown names
    /// are ignored.
    pub fn menu_selected(&mut self, name: &str, now: f64) {
        let id = match self.registry.find_by_name(name) {
            Some(body) => body.id,
            None => {
                log::debug!("Menu item '{}' doesn't name a body", name);
                return;
            }
        };
        let [x, y] = self.interface.info_panel_anchor;
        self.select(id, Point2::new(x, y), now);
    }

    /// Flips play/pause and returns the new state.
    pub fn toggle_play(&mut self) -> bool {
        let running = self.animator.toggle_running();
        self.feedback.set_play_state(running);
        log::info!("Animation {}", if running { "resumed" } else { "paused" });
        running
    }

    pub fn speed_changed(&mut self, value: f32) {
        self.animator.set_speed_factor(value);
        log::debug!("Speed factor is now {}", self.animator.speed_factor());
    }

    pub fn view_mode_changed(&mut self, mode: ViewMode, now: f64) {
        self.camera.start_view_switch(mode, now);
    }

    pub fn hide_info_panel(&mut self) {
        self.selection.info_panel_visible = false;
        self.feedback.hide_info_panel();
    }

    fn select(&mut self, id: BodyID, panel_at: Point2<f32>, now: f64) {
        let body = self.registry.get(id);
        self.selection.selected = Some(id);
        self.selection.info_panel_visible = true;
        self.feedback
            .show_info_panel(&body.info.name, &body.info.description, panel_at);

        if self.camera.start_fly_to(body, now) == FlyTo::Started {
            log::info!("Selected {}", body.name());
        }

        // Looking at a body holds the system still
        self.animator.set_running(false);
        self.feedback.set_play_state(false);
    }

    fn update_hover(&mut self, pixel: &Point2<f32>) {
        let hovered = self.body_under(pixel).map(|b| b.id);
        self.pointer.hovered = hovered;
        match hovered {
            Some(id) => {
                let at = self.offset_from_pointer(pixel);
                let name = &self.registry.get(id).info.name;
                self.feedback.show_tooltip(name, at);
                self.feedback.set_cursor(CursorStyle::Pointer);
            }
            None => {
                self.feedback.hide_tooltip();
                self.feedback.set_cursor(CursorStyle::Grab);
            }
        }
    }

    fn offset_from_pointer(&self, pixel: &Point2<f32>) -> Point2<f32> {
        let [dx, dy] = self.interface.pointer_offset;
        pixel + Vector2::new(dx, dy)
    }
}
