use kiss3d::renderer::LineRenderer;

use nalgebra::{Point3, UnitQuaternion, Vector3};

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Points on a circle around `center`. The circle lies in the plane spanned
/// by `orientation * x` and `orientation * z`.
pub fn circle_points(
    center: Point3<f32>,
    radius: f32,
    orientation: UnitQuaternion<f32>,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>> {
    let x_vec = orientation * Vector3::x();
    let z_vec = orientation * Vector3::z();
    let f = move |theta: f32| center + radius * (x_vec * theta.cos() + z_vec * theta.sin());
    path_iter_parametric(f, 0.0, std::f32::consts::TAU, num_segments)
}

/// `count` points spread over the flat annulus between `inner` and `outer`
/// around the origin. The spread is deterministic, so the belt looks the same
/// every run, and has a little thickness in y.
pub fn belt_points(inner: f32, outer: f32, count: usize) -> impl Iterator<Item = Point3<f32>> {
    // Low-discrepancy sequences keep the points from clumping
    const GOLDEN_ANGLE: f32 = 2.399_963;
    const RADIAL_STEP: f32 = 0.618_034;
    const HEIGHT_STEP: f32 = 0.754_878;
    const THICKNESS: f32 = 1.0;

    (0..count).map(move |i| {
        let i = i as f32;
        let theta = i * GOLDEN_ANGLE;
        let r = inner + (i * RADIAL_STEP).fract() * (outer - inner);
        let y = ((i * HEIGHT_STEP).fract() - 0.5) * THICKNESS;
        Point3::new(r * theta.cos(), y, r * theta.sin())
    })
}

pub fn draw_path<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}
