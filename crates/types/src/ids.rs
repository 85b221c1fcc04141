//! Handles for host-owned pixel content.
//!
//! The exporter never owns layer pixels. Every leaf (and every group, so it
//! can be rendered merged) carries a `LayerId` that the host renderer
//! resolves back to its own storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to a layer's pixel content in the host.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct LayerId(u32);

impl LayerId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<u32> for LayerId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
