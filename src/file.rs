use std::path::Path;

use serde::Deserialize;

use crate::error::NavError;
use crate::model::{BeltInfo, BodyRegistry, BodySpec};

const DEFAULT_BODIES: &str = include_str!("../assets/solar_system.toml");

#[derive(Debug, Deserialize)]
struct BodyTable {
    #[serde(default)]
    body: Vec<BodySpec>,
    #[serde(default)]
    belt: Vec<BeltInfo>,
}

pub fn read_file(path: &Path) -> Result<BodyRegistry, NavError> {
    let content = std::fs::read_to_string(path)?;
    let registry = parse_bodies(&content)?;
    log::info!("Loaded {} bodies from {}", registry.len(), path.display());
    Ok(registry)
}

/// Parses a TOML body table: an array of `[[body]]` tables, in menu order,
/// plus any number of `[[belt]]` tables.
pub fn parse_bodies(content: &str) -> Result<BodyRegistry, NavError> {
    let table: BodyTable =
        toml::from_str(content).map_err(|e| NavError::BodyTable(e.to_string()))?;
    BodyRegistry::from_specs(table.body)?.with_belts(table.belt)
}

/// The Sun and the eight planets.
pub fn default_registry() -> Result<BodyRegistry, NavError> {
    parse_bodies(DEFAULT_BODIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let registry = default_registry().unwrap();
        let names: Vec<_> = registry.bodies().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );

        let saturn = registry.lookup("saturn").unwrap();
        let ring = saturn.info.ring.unwrap();
        assert_eq!((ring.inner, ring.outer, ring.tilted), (10.0, 20.0, false));
        assert!(registry.lookup("uranus").unwrap().info.ring.unwrap().tilted);

        // Between Mars and Jupiter
        let belt = registry.belts()[0];
        assert_eq!((belt.inner, belt.outer, belt.count), (55.0, 63.0, 500));

        let earth = registry.lookup("earth").unwrap();
        assert_eq!(earth.info.angular_rate, 0.004);
        approx::assert_relative_eq!(earth.orbit_radius(), 27.0 * 2f32.sqrt());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_bodies("[[body]]\nkey = 3"), Err(NavError::BodyTable(_))));

        let missing_color = r#"
[[body]]
key = "x"
name = "X"
radius = 1.0
angular_rate = 0.1
position = [1.0, 0.0, 0.0]
"#;
        assert!(matches!(parse_bodies(missing_color), Err(NavError::BodyTable(_))));

        let bad_belt = "[[belt]]\ninner = 10.0\nouter = 5.0";
        assert!(matches!(parse_bodies(bad_belt), Err(NavError::BodyTable(_))));

        // An empty table is allowed; picking just never hits anything
        assert!(parse_bodies("").unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, NavError::Io(_)));
    }
}
