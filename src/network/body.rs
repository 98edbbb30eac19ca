//! Celestial bodies and the reference-body hierarchy.

use std::collections::HashMap;

use serde::Serialize;

use super::color::Rgba;
use super::ids::TargetId;

/// A celestial body as seen by the picker.
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub id: TargetId,
    pub name: String,
    /// Body this one orbits. `None` or the body's own id marks a top-level body.
    pub reference: Option<TargetId>,
    /// Orbital distance from the reference body (semi-major axis).
    pub distance: f64,
    /// Orbit rendering color, if the body has an orbit renderer.
    pub orbit_color: Option<Rgba>,
}

impl Body {
    /// Create a top-level body.
    pub fn new(id: TargetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reference: None,
            distance: 0.0,
            orbit_color: None,
        }
    }

    pub fn orbiting(mut self, reference: TargetId, distance: f64) -> Self {
        self.reference = Some(reference);
        self.distance = distance;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.orbit_color = Some(color);
        self
    }

    /// The body's parent, or `None` when it is its own reference body.
    pub fn parent(&self) -> Option<TargetId> {
        self.reference.filter(|reference| *reference != self.id)
    }

    pub fn is_top_level(&self) -> bool {
        self.parent().is_none()
    }
}

/// Insertion-ordered collection of bodies keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct BodyGraph {
    bodies: Vec<Body>,
    index: HashMap<TargetId, usize>,
}

impl BodyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body, replacing (in place) any body with the same identity.
    pub fn insert(&mut self, body: Body) -> Option<Body> {
        match self.index.get(&body.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.bodies[slot], body)),
            None => {
                self.index.insert(body.id, self.bodies.len());
                self.bodies.push(body);
                None
            }
        }
    }

    pub fn get(&self, id: TargetId) -> Option<&Body> {
        self.index.get(&id).map(|&slot| &self.bodies[slot])
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.index.contains_key(&id)
    }

    /// Find a body by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Iterate bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl FromIterator<Body> for BodyGraph {
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        let mut graph = BodyGraph::new();
        for body in iter {
            graph.insert(body);
        }
        graph
    }
}
