use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub description: String,
    pub radius: f32,
    pub angular_rate: f32,
    pub color: Point3<f32>,
    pub ring: Option<RingInfo>,
}

/// A decorative ring around a body. Rings are never pickable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RingInfo {
    pub inner: f32,
    pub outer: f32,
    /// Tilted rings stand up out of the orbital plane (Uranus).
    #[serde(default)]
    pub tilted: bool,
}

/// A band of small debris around the origin, scattered between `inner` and
/// `outer`. Drawn but never animated or picked.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BeltInfo {
    pub inner: f32,
    pub outer: f32,
    #[serde(default = "default_belt_count")]
    pub count: usize,
}

fn default_belt_count() -> usize {
    500
}

/// Where a body sits on its orbit. The orbit axis is the world y-axis through
/// the origin, so a body is its local position spun by `angle` around y.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitTransform {
    local_position: Point3<f32>,
    angle: f32,
}

/// Bounding volume used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub key: String,
    pub info: BodyInfo,
    transform: OrbitTransform,
}

impl OrbitTransform {
    pub fn new(local_position: Point3<f32>) -> Self {
        OrbitTransform {
            local_position,
            angle: 0.0,
        }
    }

    /// Accumulated rotation around the orbit axis, in radians. Not wrapped.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.angle)
    }

    pub fn world_position(&self) -> Point3<f32> {
        self.rotation() * self.local_position
    }

    pub fn orbit_radius(&self) -> f32 {
        let p = &self.local_position;
        p.x.hypot(p.z)
    }

    pub(super) fn advance(&mut self, delta: f32) {
        self.angle += delta;
    }
}

impl Body {
    pub(super) fn new(id: BodyID, key: String, info: BodyInfo, local_position: Point3<f32>) -> Self {
        Body {
            id,
            key,
            info,
            transform: OrbitTransform::new(local_position),
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn radius(&self) -> f32 {
        self.info.radius
    }

    pub fn transform(&self) -> &OrbitTransform {
        &self.transform
    }

    pub(super) fn transform_mut(&mut self) -> &mut OrbitTransform {
        &mut self.transform
    }

    pub fn world_position(&self) -> Point3<f32> {
        self.transform.world_position()
    }

    pub fn orbit_radius(&self) -> f32 {
        self.transform.orbit_radius()
    }

    pub fn hit_sphere(&self) -> HitSphere {
        HitSphere {
            center: self.world_position(),
            radius: self.info.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_orbit_transform() {
        let mut transform = OrbitTransform::new(Point3::new(3.0, 1.0, 4.0));
        assert_eq!(transform.angle(), 0.0);
        approx::assert_relative_eq!(transform.orbit_radius(), 5.0);

        // A quarter turn around +y sends +x to -z; height is untouched
        transform.advance(FRAC_PI_2);
        approx::assert_relative_eq!(
            transform.world_position(),
            Point3::new(4.0, 1.0, -3.0),
            epsilon = 1e-5
        );
        approx::assert_relative_eq!(transform.orbit_radius(), 5.0);
    }
}
