use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, PointRenderer, Renderer};
use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

use self::utils::{belt_points, circle_points, draw_path};

mod utils;

const ORBIT_SEGMENTS: usize = 256;
const RING_SEGMENTS: usize = 96;
// Concentric circles used to fill in a ring band
const RING_BANDS: usize = 5;
const HIGHLIGHT_SEGMENTS: usize = 64;

struct Highlight {
    center: Point3<f32>,
    radius: f32,
    color: Point3<f32>,
}

pub struct CompoundRenderer {
    line_renderer: LineRenderer,
    point_renderer: PointRenderer,
    // Screen-facing circles need the camera, so they wait for `render`
    highlights: Vec<Highlight>,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            line_renderer: LineRenderer::new(),
            point_renderer: PointRenderer::new(),
            highlights: vec![],
        }
    }

    /// Orbits are circles about the world origin in the xz-plane.
    pub fn draw_orbit(&mut self, radius: f32, color: Point3<f32>) {
        let points = circle_points(
            Point3::origin(),
            radius,
            UnitQuaternion::identity(),
            ORBIT_SEGMENTS,
        );
        draw_path(&mut self.line_renderer, points, &color);
    }

    /// A flat band between `inner` and `outer`. The band lies in the plane
    /// spanned by `orientation * x` and `orientation * z`.
    pub fn draw_ring(
        &mut self,
        center: Point3<f32>,
        orientation: UnitQuaternion<f32>,
        inner: f32,
        outer: f32,
        color: Point3<f32>,
    ) {
        for i in 0..RING_BANDS {
            let u = i as f32 / (RING_BANDS - 1) as f32;
            let radius = inner + u * (outer - inner);
            let points = circle_points(center, radius, orientation, RING_SEGMENTS);
            draw_path(&mut self.line_renderer, points, &color);
        }
    }

    pub fn draw_belt(&mut self, inner: f32, outer: f32, count: usize, color: Point3<f32>) {
        for pt in belt_points(inner, outer, count) {
            self.point_renderer.draw_point(pt, color);
        }
    }

    /// A circle around a sphere's silhouette, facing the camera.
    pub fn draw_highlight(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.highlights.push(Highlight {
            center,
            radius,
            color,
        });
    }
}

/// Orientation whose x and z axes both lie in the screen plane, so
/// `circle_points` with it draws a circle parallel to the screen.
fn screen_facing(view: &Isometry3<f32>) -> UnitQuaternion<f32> {
    view.rotation.inverse() * tilted_ring()
}

/// Rotation that stands a ring up on its edge, for bodies whose rings face
/// the orbital plane instead of lying in it.
pub fn tilted_ring() -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::FRAC_PI_2)
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        let facing = screen_facing(&camera.view_transform());
        for h in self.highlights.drain(..) {
            let points = circle_points(h.center, h.radius, facing, HIGHLIGHT_SEGMENTS);
            draw_path(&mut self.line_renderer, points, &h.color);
        }
        self.line_renderer.render(pass, camera);
        self.point_renderer.render(pass, camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_faces_the_eye() {
        let eye = Point3::new(30.0, 40.0, 50.0);
        let center = Point3::new(5.0, 0.0, -3.0);
        let view = Isometry3::look_at_rh(&eye, &center, &Vector3::y());

        let facing = screen_facing(&view);
        let forward = (center - eye).normalize();
        for pt in circle_points(center, 2.0, facing, 32) {
            approx::assert_relative_eq!((pt - center).norm(), 2.0, epsilon = 1e-4);
            approx::assert_abs_diff_eq!((pt - center).dot(&forward), 0.0, epsilon = 1e-4);
        }
    }
}
