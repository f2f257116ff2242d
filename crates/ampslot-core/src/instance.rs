//! Instance handles.

use serde::{Deserialize, Serialize};

/// Opaque handle to one rack slot.
///
/// Issued in strictly increasing order by the rack that owns the slot and
/// never reused, so a stale handle can never address a newer instance.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Creates an instance ID from a raw value, e.g. one received from a host.
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
