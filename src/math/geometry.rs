use nalgebra::{Point3, Unit, Vector3};

/// A half-line in world space. `t` along the ray is measured in world units,
/// since the direction is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub dir: Unit<Vector3<f32>>,
}

impl Ray {
    /// Returns None if `dir` is too small to normalize.
    pub fn through(origin: Point3<f32>, toward: Point3<f32>) -> Option<Self> {
        let dir = Unit::try_new(toward - origin, f32::EPSILON)?;
        Some(Ray { origin, dir })
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.dir.into_inner() * t
    }
}

pub fn reject(u: &Vector3<f32>, v: &Vector3<f32>) -> Vector3<f32> {
    // Computes the vector rejection of u from v. v must be non-zero.
    let u_proj_v = u.dot(v) * v / v.norm_squared();
    u - u_proj_v
}

/// Ray parameter of the first point where the ray meets the sphere, if any.
///
/// If the ray starts inside the sphere, the exit point is returned. Hits
/// behind the origin (negative `t`) don't count.
pub fn ray_sphere_hit(ray: &Ray, center: &Point3<f32>, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let dir = ray.dir.into_inner();

    // Closest approach of the ray's line to the center
    let t_closest = to_center.dot(&dir);
    let miss_sq = reject(&to_center, &dir).norm_squared();
    let radius_sq = radius * radius;
    if miss_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - miss_sq).sqrt();
    let (t_near, t_far) = (t_closest - half_chord, t_closest + half_chord);
    if t_far < 0.0 {
        None
    } else if t_near >= 0.0 {
        Some(t_near)
    } else {
        Some(t_far)
    }
}

/// The quadratic ease curve used for camera transitions: fast start, gentle
/// landing. Input is clamped to [0, 1]; the output is exactly 0 and 1 at the
/// ends.
pub fn quadratic_ease(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    p * (2.0 - p)
}

pub fn lerp_point(from: &Point3<f32>, to: &Point3<f32>, t: f32) -> Point3<f32> {
    from + (to - from) * t
}
