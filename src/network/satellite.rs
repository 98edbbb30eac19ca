//! Mobile objects (satellites) and their registry.

use serde::Serialize;

use super::ids::TargetId;

/// A mobile object orbiting a body.
#[derive(Debug, Clone, Serialize)]
pub struct Satellite {
    pub id: TargetId,
    pub name: String,
    /// The body this satellite currently orbits.
    pub body: TargetId,
}

impl Satellite {
    pub fn new(id: TargetId, name: impl Into<String>, body: TargetId) -> Self {
        Self {
            id,
            name: name.into(),
            body,
        }
    }
}

/// Insertion-ordered satellite registry.
#[derive(Debug, Clone, Default)]
pub struct SatelliteRegistry {
    satellites: Vec<Satellite>,
}

impl SatelliteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a satellite. Re-registering an identity replaces the entry in place.
    pub fn register(&mut self, satellite: Satellite) -> Option<Satellite> {
        match self.satellites.iter_mut().find(|s| s.id == satellite.id) {
            Some(existing) => Some(std::mem::replace(existing, satellite)),
            None => {
                self.satellites.push(satellite);
                None
            }
        }
    }

    pub fn unregister(&mut self, id: TargetId) -> Option<Satellite> {
        let position = self.satellites.iter().position(|s| s.id == id)?;
        Some(self.satellites.remove(position))
    }

    pub fn get(&self, id: TargetId) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter()
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}
