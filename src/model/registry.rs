use std::collections::HashSet;

use nalgebra::Point3;
use serde::Deserialize;

use super::body::{BeltInfo, Body, BodyID, BodyInfo, RingInfo};
use crate::error::NavError;

/// One row of the body table, as written by hand. Nothing here is trusted
/// until `BodyRegistry::from_specs` has looked at it.
#[derive(Debug, Clone, Deserialize)]
pub struct BodySpec {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub radius: f32,
    pub angular_rate: f32,
    pub position: [f32; 3],
    pub color: String,
    #[serde(default)]
    pub ring: Option<RingInfo>,
}

/// The fixed set of bodies in the diagram, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    belts: Vec<BeltInfo>,
}

impl BodyRegistry {
    pub fn from_specs(specs: Vec<BodySpec>) -> Result<Self, NavError> {
        let mut keys = HashSet::new();
        let mut names = HashSet::new();
        let mut bodies = Vec::with_capacity(specs.len());

        for spec in specs {
            if !keys.insert(spec.key.clone()) {
                return Err(NavError::DuplicateBody(spec.key));
            }
            if !names.insert(spec.name.to_lowercase()) {
                return Err(NavError::DuplicateBody(spec.name));
            }

            let invalid = |reason: String| NavError::InvalidBody {
                key: spec.key.clone(),
                reason,
            };
            if !(spec.radius.is_finite() && spec.radius > 0.0) {
                return Err(invalid(format!("radius must be positive, got {}", spec.radius)));
            }
            if !spec.angular_rate.is_finite() {
                return Err(invalid("angular rate must be finite".to_owned()));
            }
            if !spec.position.iter().all(|x| x.is_finite()) {
                return Err(invalid("position must be finite".to_owned()));
            }
            if let Some(ring) = &spec.ring {
                if !(ring.inner >= 0.0 && ring.inner < ring.outer) {
                    return Err(invalid(format!(
                        "ring needs 0 <= inner < outer, got {} and {}",
                        ring.inner, ring.outer
                    )));
                }
            }
            let color = parse_color(&spec.color).ok_or_else(|| {
                invalid(format!("color must be six hex digits, got '{}'", spec.color))
            })?;

            let id = BodyID(bodies.len());
            let info = BodyInfo {
                name: spec.name,
                description: spec.description,
                radius: spec.radius,
                angular_rate: spec.angular_rate,
                color,
                ring: spec.ring,
            };
            let [x, y, z] = spec.position;
            bodies.push(Body::new(id, spec.key, info, Point3::new(x, y, z)));
        }

        Ok(BodyRegistry {
            bodies,
            belts: vec![],
        })
    }

    pub fn with_belts(mut self, belts: Vec<BeltInfo>) -> Result<Self, NavError> {
        for belt in belts.iter() {
            if !(belt.inner >= 0.0 && belt.inner < belt.outer && belt.outer.is_finite()) {
                return Err(NavError::BodyTable(format!(
                    "belt needs 0 <= inner < outer, got {} and {}",
                    belt.inner, belt.outer
                )));
            }
        }
        self.belts = belts;
        Ok(self)
    }

    pub fn belts(&self) -> &[BeltInfo] {
        &self.belts
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in declaration order.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn list(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn lookup(&self, key: &str) -> Result<&Body, NavError> {
        self.bodies
            .iter()
            .find(|b| b.key == key)
            .ok_or_else(|| NavError::NotFound(key.to_owned()))
    }

    /// Resolves a display name, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        let name = name.trim();
        self.bodies
            .iter()
            .find(|b| b.info.name.eq_ignore_ascii_case(name))
    }

    pub(super) fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.bodies.iter_mut()
    }
}

fn parse_color(s: &str) -> Option<Point3<f32>> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16).ok();
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    Some(Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(key: &str, name: &str, radius: f32) -> BodySpec {
        BodySpec {
            key: key.to_owned(),
            name: name.to_owned(),
            description: String::new(),
            radius,
            angular_rate: 0.001,
            position: [radius * 10.0, 0.0, 0.0],
            color: "ffffff".to_owned(),
            ring: None,
        }
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let registry = BodyRegistry::from_specs(vec![
            spec("sun", "Sun", 5.0),
            spec("mercury", "Mercury", 0.4),
            spec("venus", "Venus", 0.9),
        ])
        .unwrap();

        let keys: Vec<_> = registry.bodies().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["sun", "mercury", "venus"]);
        for (idx, body) in registry.bodies().enumerate() {
            assert_eq!(body.id, BodyID(idx));
            assert_eq!(registry.get(body.id).key, body.key);
        }
    }

    #[test]
    fn test_lookup() {
        let registry = BodyRegistry::from_specs(vec![spec("earth", "Earth", 1.0)]).unwrap();

        assert_eq!(registry.lookup("earth").unwrap().name(), "Earth");
        assert!(matches!(registry.lookup("pluto"), Err(NavError::NotFound(k)) if k == "pluto"));

        assert_eq!(registry.find_by_name(" earth ").unwrap().key, "earth");
        assert!(registry.find_by_name("Pluto").is_none());
    }

    #[test]
    fn test_validation() {
        let dup = BodyRegistry::from_specs(vec![spec("a", "A", 1.0), spec("a", "B", 1.0)]);
        assert!(matches!(dup, Err(NavError::DuplicateBody(_))));

        let dup_name = BodyRegistry::from_specs(vec![spec("a", "Same", 1.0), spec("b", "same", 1.0)]);
        assert!(matches!(dup_name, Err(NavError::DuplicateBody(_))));

        let zero_radius = BodyRegistry::from_specs(vec![spec("a", "A", 0.0)]);
        assert!(matches!(zero_radius, Err(NavError::InvalidBody { .. })));

        let mut bad_ring = spec("a", "A", 1.0);
        bad_ring.ring = Some(RingInfo {
            inner: 3.0,
            outer: 2.0,
            tilted: false,
        });
        assert!(matches!(
            BodyRegistry::from_specs(vec![bad_ring]),
            Err(NavError::InvalidBody { .. })
        ));

        let mut bad_color = spec("a", "A", 1.0);
        bad_color.color = "blue".to_owned();
        assert!(matches!(
            BodyRegistry::from_specs(vec![bad_color]),
            Err(NavError::InvalidBody { .. })
        ));
    }

    #[test]
    fn test_parse_color() {
        approx::assert_relative_eq!(
            parse_color("#ff8000").unwrap(),
            Point3::new(1.0, 128.0 / 255.0, 0.0)
        );
        assert_eq!(parse_color("fff"), None);
        assert_eq!(parse_color("gg0000"), None);
    }
}
