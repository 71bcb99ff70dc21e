use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point2, Point3, Vector2, Vector3, Vector4};

use super::transition::CameraPose;
use crate::math::geometry::Ray;
use crate::options::CameraOptions;

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;

// A cousin of ArcBall that orbits an arbitrary look-at anchor with y as up.
// Dragging orbits, scrolling zooms. Unlike ArcBall, the eye and anchor can be
// set directly, which is how the transition controller flies it around.
//
// Free-form input is only honoured while `free_form` is set. Only the
// transition controller flips that flag; the camera never decides for itself.
pub struct OrbitCamera {
    // -- position --
    eye: Point3<f32>,
    target: Point3<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- other --
    free_form: bool,
    last_cursor_pos: Vector2<f32>,
    // -- knobs to fiddle with --
    rotate_step: f32,
    zoom_ratio: f32,
    phi_limit: f32,
    distance_limits: (f32, f32),
}

impl OrbitCamera {
    pub fn new(pose: CameraPose, options: &CameraOptions) -> Self {
        OrbitCamera {
            eye: pose.eye,
            target: pose.target,
            width: 800,
            height: 600,
            fovy: options.fovy_degrees.to_radians(),
            znear: options.znear,
            zfar: options.zfar,
            free_form: false,
            last_cursor_pos: Vector2::zeros(),
            rotate_step: options.rotate_step,
            zoom_ratio: options.zoom_ratio,
            phi_limit: 0.001,
            distance_limits: (options.min_distance, options.max_distance),
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
        }
    }

    pub(super) fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    pub fn free_form_enabled(&self) -> bool {
        self.free_form
    }

    pub(super) fn set_free_form(&mut self, enabled: bool) {
        self.free_form = enabled;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).norm()
    }

    pub fn viewport(&self) -> Vector2<f32> {
        Vector2::new(self.width as f32, self.height as f32)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    // Looking straight down the y-axis leaves "up" undefined; fall back to -z
    // so the top-down view has the far side of the system at the top.
    fn up_vector(&self) -> Vector3<f32> {
        let forward = self.target - self.eye;
        if forward.cross(&Vector3::y()).norm() <= 1e-6 * forward.norm() {
            -Vector3::z()
        } else {
            Vector3::y()
        }
    }

    /// World-space ray from the eye through a point given in normalized device
    /// coordinates, both axes in [-1, 1] with +y up.
    pub fn ray_through_ndc(&self, ndc: &Point2<f32>) -> Option<Ray> {
        let inverse = self.transformation().try_inverse()?;
        let far = inverse * Vector4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = Point3::from_homogeneous(far)?;
        Ray::through(self.eye, far)
    }

    /// Orbits the eye around the anchor. `dtheta` spins around the y-axis,
    /// `dphi` tilts toward or away from the pole.
    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        let offset = self.eye - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return;
        }

        let theta = offset.x.atan2(offset.z) + dtheta;
        let phi = nalgebra::clamp(
            (offset.y / radius).clamp(-1.0, 1.0).acos() + dphi,
            self.phi_limit,
            PI - self.phi_limit,
        );

        let offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        self.eye = self.target + offset;
    }

    pub fn zoom(&mut self, factor: f32) {
        let offset = self.eye - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return;
        }
        let new_radius = nalgebra::clamp(
            radius * factor,
            self.distance_limits.0,
            self.distance_limits.1,
        );
        self.eye = self.target + offset * (new_radius / radius);
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        // Bookkeeping happens regardless of who's driving
        match *event {
            WindowEvent::FramebufferSize(w, h) => {
                self.set_viewport(w, h);
                return;
            }
            WindowEvent::CursorPos(x, y, _) if !self.free_form => {
                self.last_cursor_pos = Vector2::new(x as f32, y as f32);
                return;
            }
            _ if !self.free_form => return,
            _ => {}
        }

        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    let dpos = curr_pos - self.last_cursor_pos;
                    self.rotate(-dpos.x * self.rotate_step, -dpos.y * self.rotate_step);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.zoom_ratio);
                } else if off > 0.0 {
                    self.zoom(self.zoom_ratio.recip())
                }
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(self.zoom_ratio.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(self.zoom_ratio),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        let target = if (self.target - self.eye).norm() <= f32::EPSILON {
            self.eye - Vector3::z()
        } else {
            self.target
        };
        Isometry3::look_at_rh(&self.eye, &target, &self.up_vector())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
