//! Actor identifier supplied by the identity collaborator
//!
//! The engine never inspects the contents; it is an opaque, stable string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier for one actor (team member)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Wrap an identity-collaborator-issued identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_round_trip() {
        let actor = ActorId::new("usr_7f3a");
        assert_eq!(actor.as_str(), "usr_7f3a");
        assert_eq!(actor.to_string(), "usr_7f3a");
        assert_eq!(ActorId::from("usr_7f3a"), actor);
    }

    #[test]
    fn test_serde_transparent() {
        let actor = ActorId::new("usr_1");
        let json = serde_json::to_string(&actor).unwrap();
        assert_eq!(json, "\"usr_1\"");
        let back: ActorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actor);
    }
}
