//! Pointer picking: which body, if any, is under a screen position.

use nalgebra::{Point2, Vector2};

use super::camera::OrbitCamera;
use crate::math::geometry::{ray_sphere_hit, Ray};
use crate::model::{Body, BodyRegistry};

#[derive(Debug, Clone, Copy)]
pub struct PickHit<'r> {
    pub body: &'r Body,
    /// Distance from the eye along the pick ray.
    pub distance: f32,
}

/// Converts a pointer position in pixels (origin top-left, y down) to
/// normalized device coordinates (origin center, y up).
pub fn pixel_to_ndc(pixel: &Point2<f32>, viewport: &Vector2<f32>) -> Point2<f32> {
    Point2::new(
        2.0 * pixel.x / viewport.x - 1.0,
        1.0 - 2.0 * pixel.y / viewport.y,
    )
}

/// The body under `ndc` as seen from `camera`, if any.
pub fn pick<'r>(
    camera: &OrbitCamera,
    registry: &'r BodyRegistry,
    ndc: &Point2<f32>,
) -> Option<&'r Body> {
    let ray = camera.ray_through_ndc(ndc)?;
    pick_ray(&ray, registry).map(|hit| hit.body)
}

/// Nearest body hit by `ray`.
///
/// Ordering contract:
/// - The smallest ray parameter wins.
/// - On an exact tie, the body declared first wins.
///
/// Only bodies are tested. Rings and orbit paths aren't in the registry, so
/// they can never be picked.
pub fn pick_ray<'r>(ray: &Ray, registry: &'r BodyRegistry) -> Option<PickHit<'r>> {
    let mut best: Option<PickHit<'r>> = None;

    for body in registry.bodies() {
        let sphere = body.hit_sphere();
        let t = match ray_sphere_hit(ray, &sphere.center, sphere.radius) {
            Some(t) => t,
            None => continue,
        };

        best = match best {
            Some(hit) if hit.distance <= t => Some(hit),
            _ => Some(PickHit { body, distance: t }),
        };
    }

    if let Some(hit) = &best {
        log::debug!("Picked {} at distance {:.2}", hit.body.name(), hit.distance);
    }
    best
}
