//! Stable identities for targets and antennas.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of something an antenna can point at: a body, a satellite, or nothing.
///
/// Bodies and satellites share one identity space, so a target identity alone
/// is enough to find the matching tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(Uuid);

impl TargetId {
    /// The "no target" identity (the nil UUID).
    pub const NONE: TargetId = TargetId(Uuid::nil());

    /// A fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// A deterministic identity derived from a display name.
    ///
    /// Scenario files use names only, so this keeps identities stable across runs.
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Uuid> for TargetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a registered antenna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AntennaId(Uuid);

impl AntennaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()))
    }
}

impl Default for AntennaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AntennaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
