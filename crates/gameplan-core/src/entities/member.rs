//! Roster member entity

use serde::{Deserialize, Serialize};

use crate::value_objects::ActorId;

/// Team roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub actor_id: ActorId,
    pub display_name: String,
    /// Short name used for `@handle` mentions
    pub handle: String,
    pub title: Option<String>,
}

impl Member {
    /// Create a new member
    pub fn new(
        actor_id: ActorId,
        display_name: impl Into<String>,
        handle: impl Into<String>,
    ) -> Self {
        Self {
            actor_id,
            display_name: display_name.into(),
            handle: handle.into(),
            title: None,
        }
    }

    /// Set the member's title (e.g. "Coach")
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Uppercase initials derived from the display name
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}
