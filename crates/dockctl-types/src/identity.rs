//! Container identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Addresses one container either by the engine-assigned id or by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    /// Opaque id assigned by the engine, never reused while the container exists
    Id(String),
    /// Human-chosen name, unique among live containers, mutable via rename
    Name(String),
}

impl Identity {
    pub fn as_str(&self) -> &str {
        match self {
            Identity::Id(id) => id,
            Identity::Name(name) => name,
        }
    }

    pub fn is_id(&self) -> bool {
        matches!(self, Identity::Id(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Identity::Id(id) => Some(id),
            Identity::Name(_) => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
