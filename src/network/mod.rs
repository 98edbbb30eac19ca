//! The relay network: bodies, satellites, antennas, and their change events.

mod antenna;
mod body;
mod color;
mod events;
mod ids;
mod satellite;
pub mod scenario;

pub use antenna::{Antenna, AntennaRegistry};
pub use body::{Body, BodyGraph};
pub use color::Rgba;
pub use events::{EventHub, NetworkEvents, Registered, Subscription, SubscriptionId};
pub use ids::{AntennaId, TargetId};
pub use satellite::{Satellite, SatelliteRegistry};

use crate::error::{PickerError, Result};

/// Read-only view of the registries handed to event handlers.
#[derive(Debug, Clone, Copy)]
pub struct NetworkView<'a> {
    pub bodies: &'a BodyGraph,
    pub satellites: &'a SatelliteRegistry,
    pub antennas: &'a AntennaRegistry,
}

impl NetworkView<'_> {
    /// Current target of an antenna, or [`TargetId::NONE`] if it is unknown.
    pub fn target_of(&self, antenna: AntennaId) -> TargetId {
        self.antennas
            .get(antenna)
            .map(|a| a.target)
            .unwrap_or(TargetId::NONE)
    }

    /// Display name of a target, if it names a body or satellite.
    pub fn target_name(&self, target: TargetId) -> Option<&str> {
        self.bodies
            .get(target)
            .map(|b| b.name.as_str())
            .or_else(|| self.satellites.get(target).map(|s| s.name.as_str()))
    }
}

/// Owns the registries and raises an event after each registry mutation.
#[derive(Debug, Default)]
pub struct Network {
    bodies: BodyGraph,
    satellites: SatelliteRegistry,
    antennas: AntennaRegistry,
    events: NetworkEvents,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> NetworkView<'_> {
        NetworkView {
            bodies: &self.bodies,
            satellites: &self.satellites,
            antennas: &self.antennas,
        }
    }

    pub fn bodies(&self) -> &BodyGraph {
        &self.bodies
    }

    pub fn satellites(&self) -> &SatelliteRegistry {
        &self.satellites
    }

    pub fn antennas(&self) -> &AntennaRegistry {
        &self.antennas
    }

    pub fn events(&self) -> &NetworkEvents {
        &self.events
    }

    pub fn add_body(&mut self, body: Body) {
        let id = body.id;
        tracing::debug!(body = %body.name, %id, "Adding body");
        self.bodies.insert(body);
        self.events.registered.emit(&Registered::Body(id), &self.view());
    }

    pub fn register_satellite(&mut self, satellite: Satellite) {
        let id = satellite.id;
        tracing::debug!(satellite = %satellite.name, %id, "Registering satellite");
        self.satellites.register(satellite);
        self.events
            .registered
            .emit(&Registered::Satellite(id), &self.view());
    }

    pub fn unregister_satellite(&mut self, id: TargetId) -> Option<Satellite> {
        let satellite = self.satellites.unregister(id)?;
        tracing::debug!(satellite = %satellite.name, %id, "Unregistering satellite");
        self.events
            .satellite_unregistered
            .emit(&satellite, &self.view());
        Some(satellite)
    }

    /// Antenna registration raises no event; pickers only care about removal.
    pub fn register_antenna(&mut self, antenna: Antenna) -> AntennaId {
        let id = antenna.id;
        tracing::debug!(antenna = %antenna.name, %id, "Registering antenna");
        self.antennas.register(antenna);
        id
    }

    pub fn unregister_antenna(&mut self, id: AntennaId) -> Option<Antenna> {
        let antenna = self.antennas.unregister(id)?;
        tracing::debug!(antenna = %antenna.name, %id, "Unregistering antenna");
        self.events.antenna_unregistered.emit(&antenna, &self.view());
        Some(antenna)
    }

    pub fn target_of(&self, antenna: AntennaId) -> TargetId {
        self.view().target_of(antenna)
    }

    /// Point an antenna at a target. Raises no event.
    pub fn set_target(&mut self, antenna: AntennaId, target: TargetId) -> Result<()> {
        let entry = self
            .antennas
            .get_mut(antenna)
            .ok_or(PickerError::UnknownAntenna(antenna))?;
        tracing::info!(antenna = %entry.name, %target, "Setting antenna target");
        entry.target = target;
        Ok(())
    }
}
