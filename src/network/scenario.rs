//! TOML scenario files describing a relay network.
//!
//! Everything is referred to by name; identities are derived from names with
//! [`TargetId::from_name`] and [`AntennaId::from_name`], so the same file always
//! yields the same identities.
//!
//! ```toml
//! [[bodies]]
//! name = "Kerbol"
//!
//! [[bodies]]
//! name = "Kerbin"
//! parent = "Kerbol"
//! distance = 13599840256.0
//! color = "#4d7fff"
//!
//! [[satellites]]
//! name = "CommSat 1"
//! body = "Kerbin"
//!
//! [[antennas]]
//! name = "KR-7"
//! target = "Kerbin"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Antenna, AntennaId, Body, Network, Rgba, Satellite, TargetId};
use crate::error::ScenarioError;

/// The Kerbol system with a handful of relays, used when no scenario file is given.
pub const BUILTIN: &str = include_str!("kerbol.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub bodies: Vec<BodySpec>,
    pub satellites: Vec<SatelliteSpec>,
    pub antennas: Vec<AntennaSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    /// Reference body; omitted (or equal to `name`) for top-level bodies.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub color: Option<Rgba>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteSpec {
    pub name: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntennaSpec {
    pub name: String,
    #[serde(default)]
    pub target: Option<String>,
}

impl Scenario {
    pub fn builtin() -> Result<Self, ScenarioError> {
        Self::parse(BUILTIN)
    }

    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded scenario file");
        Self::parse(&content)
    }

    /// Load `path` if given, otherwise the built-in scenario.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ScenarioError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Check that names are unique and every reference resolves.
    ///
    /// Parents may be declared after their children.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut targets = HashSet::new();
        for name in self
            .bodies
            .iter()
            .map(|b| &b.name)
            .chain(self.satellites.iter().map(|s| &s.name))
        {
            if !targets.insert(name.as_str()) {
                return Err(ScenarioError::DuplicateName(name.clone()));
            }
        }

        let bodies: HashSet<&str> = self.bodies.iter().map(|b| b.name.as_str()).collect();
        for body in &self.bodies {
            if let Some(parent) = &body.parent {
                if !bodies.contains(parent.as_str()) {
                    return Err(ScenarioError::UnknownBody {
                        name: parent.clone(),
                        referenced_by: body.name.clone(),
                    });
                }
            }
        }
        for satellite in &self.satellites {
            if !bodies.contains(satellite.body.as_str()) {
                return Err(ScenarioError::UnknownBody {
                    name: satellite.body.clone(),
                    referenced_by: satellite.name.clone(),
                });
            }
        }

        let mut antennas = HashSet::new();
        for antenna in &self.antennas {
            if !antennas.insert(antenna.name.as_str()) {
                return Err(ScenarioError::DuplicateName(antenna.name.clone()));
            }
            if let Some(target) = &antenna.target {
                if !targets.contains(target.as_str()) {
                    return Err(ScenarioError::UnknownTarget {
                        name: target.clone(),
                        antenna: antenna.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Pick an antenna by name, or the first one declared.
    pub fn antenna_id(&self, name: Option<&str>) -> Result<AntennaId, ScenarioError> {
        let spec = match name {
            Some(name) => self
                .antennas
                .iter()
                .find(|a| a.name == name)
                .ok_or_else(|| ScenarioError::UnknownAntenna(name.to_string()))?,
            None => self.antennas.first().ok_or(ScenarioError::NoAntennas)?,
        };
        Ok(AntennaId::from_name(&spec.name))
    }

    /// Populate a fresh [`Network`]. No one is subscribed yet, so no handlers run.
    pub fn into_network(self) -> Network {
        let mut network = Network::new();

        for spec in self.bodies {
            let id = TargetId::from_name(&spec.name);
            let mut body = Body::new(id, spec.name);
            body.reference = spec.parent.as_deref().map(TargetId::from_name);
            body.distance = spec.distance;
            body.orbit_color = spec.color;
            network.add_body(body);
        }

        for spec in self.satellites {
            let body = TargetId::from_name(&spec.body);
            network.register_satellite(Satellite::new(
                TargetId::from_name(&spec.name),
                spec.name,
                body,
            ));
        }

        for spec in self.antennas {
            let target = spec
                .target
                .as_deref()
                .map(TargetId::from_name)
                .unwrap_or(TargetId::NONE);
            network.register_antenna(
                Antenna::new(AntennaId::from_name(&spec.name), spec.name).with_target(target),
            );
        }

        network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenario_is_valid() {
        let scenario = Scenario::builtin().unwrap();
        assert!(scenario.bodies.iter().any(|b| b.name == "Kerbin"));
        assert!(!scenario.antennas.is_empty());

        let network = scenario.into_network();
        let kerbol = network.bodies().find_by_name("Kerbol").unwrap();
        assert!(kerbol.is_top_level());
    }

    #[test]
    fn test_parent_declared_after_child() {
        let scenario = Scenario::parse(
            r#"
[[bodies]]
name = "Mun"
parent = "Kerbin"
distance = 12000000.0

[[bodies]]
name = "Kerbin"
"#,
        )
        .unwrap();
        let network = scenario.into_network();
        let mun = network.bodies().find_by_name("Mun").unwrap();
        assert_eq!(mun.parent(), Some(TargetId::from_name("Kerbin")));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Scenario::parse(
            r#"
[[bodies]]
name = "Kerbin"

[[satellites]]
name = "Kerbin"
body = "Kerbin"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioError::DuplicateName(name) if name == "Kerbin"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = Scenario::parse(
            r#"
[[bodies]]
name = "Mun"
parent = "Kerbin"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownBody { .. }));
    }

    #[test]
    fn test_unknown_target_rejected() {
        let err = Scenario::parse(
            r#"
[[bodies]]
name = "Kerbin"

[[antennas]]
name = "Dish"
target = "Mun"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownTarget { .. }));
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = Scenario::parse(
            r#"
[[bodies]]
name = "Kerbin"
color = "blue"
"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_antenna_selection() {
        let scenario = Scenario::parse(
            r#"
[[antennas]]
name = "Omni"

[[antennas]]
name = "Dish"
"#,
        )
        .unwrap();
        assert_eq!(scenario.antenna_id(None).unwrap(), AntennaId::from_name("Omni"));
        assert_eq!(
            scenario.antenna_id(Some("Dish")).unwrap(),
            AntennaId::from_name("Dish")
        );
        assert!(matches!(
            scenario.antenna_id(Some("Laser")),
            Err(ScenarioError::UnknownAntenna(_))
        ));
        assert!(matches!(
            Scenario::default().antenna_id(None),
            Err(ScenarioError::NoAntennas)
        ));
    }
}
