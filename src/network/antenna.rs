//! Directional antennas and their registry.

use serde::Serialize;

use super::ids::{AntennaId, TargetId};

/// A directional antenna. Only its identity and target are used by the picker.
#[derive(Debug, Clone, Serialize)]
pub struct Antenna {
    pub id: AntennaId,
    pub name: String,
    pub target: TargetId,
}

impl Antenna {
    pub fn new(id: AntennaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            target: TargetId::NONE,
        }
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = target;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AntennaRegistry {
    antennas: Vec<Antenna>,
}

impl AntennaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, antenna: Antenna) -> Option<Antenna> {
        match self.antennas.iter_mut().find(|a| a.id == antenna.id) {
            Some(existing) => Some(std::mem::replace(existing, antenna)),
            None => {
                self.antennas.push(antenna);
                None
            }
        }
    }

    pub fn unregister(&mut self, id: AntennaId) -> Option<Antenna> {
        let position = self.antennas.iter().position(|a| a.id == id)?;
        Some(self.antennas.remove(position))
    }

    pub fn get(&self, id: AntennaId) -> Option<&Antenna> {
        self.antennas.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AntennaId) -> Option<&mut Antenna> {
        self.antennas.iter_mut().find(|a| a.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Antenna> {
        self.antennas.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Antenna> {
        self.antennas.iter()
    }

    pub fn len(&self) -> usize {
        self.antennas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }
}
