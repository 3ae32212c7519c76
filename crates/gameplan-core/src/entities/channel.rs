//! Channel entity - registry entry for a chat channel

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Chat channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub private: bool,
}

impl Channel {
    /// Create a new public channel
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            private: false,
        }
    }

    /// Set the channel description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_creation() {
        let channel = Channel::new(Snowflake::new(1), "general")
            .with_description("General team discussion and announcements");
        assert_eq!(channel.name, "general");
        assert!(!channel.private);
        assert!(channel.description.is_some());
    }
}
