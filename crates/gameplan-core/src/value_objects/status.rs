//! Status dimensions and their closed value enumerations
//!
//! A dimension names one axis of status a subject can carry: event
//! attendance, presence on a roster, or one reaction emoji on a message.
//! Every emoji is its own dimension, so one actor can hold several
//! reactions on the same message while still holding at most one record
//! per dimension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RSVP answer for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rsvp {
    Going,
    Maybe,
    Declined,
}

impl fmt::Display for Rsvp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Going => write!(f, "going"),
            Self::Maybe => write!(f, "maybe"),
            Self::Declined => write!(f, "declined"),
        }
    }
}

/// Presence state of a roster member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    #[default]
    Offline,
}

impl PresenceStatus {
    /// Whether this state renders as an active indicator
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Away => write!(f, "away"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl FromStr for PresenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "away" => Ok(Self::Away),
            "offline" => Ok(Self::Offline),
            _ => Err(format!("invalid presence status: {s}")),
        }
    }
}

/// One axis of status on a subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "emoji")]
pub enum Dimension {
    /// Event RSVP
    Attendance,
    /// One emoji on a message; the emoji is part of the dimension key
    Reaction(String),
    /// Roster presence
    Presence,
}

impl Dimension {
    /// Shorthand for a reaction dimension
    pub fn reaction(emoji: impl Into<String>) -> Self {
        Self::Reaction(emoji.into())
    }

    /// Closed-enumeration check: does `value` belong to this dimension?
    ///
    /// A mismatch is a programming error, checked before any ledger
    /// mutation (fail closed).
    #[must_use]
    pub fn accepts(&self, value: &StatusValue) -> bool {
        matches!(
            (self, value),
            (Self::Attendance, StatusValue::Attendance(_))
                | (Self::Reaction(_), StatusValue::Reacted)
                | (Self::Presence, StatusValue::Presence(_))
        )
    }

    /// Whether this is a reaction dimension, and for which emoji
    #[must_use]
    pub fn reaction_emoji(&self) -> Option<&str> {
        match self {
            Self::Reaction(emoji) => Some(emoji),
            _ => None,
        }
    }
}

// Wire encoding used by the persistence collaborator: a single text column.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attendance => write!(f, "attendance"),
            Self::Reaction(emoji) => write!(f, "reaction:{emoji}"),
            Self::Presence => write!(f, "presence"),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attendance" => Ok(Self::Attendance),
            "presence" => Ok(Self::Presence),
            _ => match s.strip_prefix("reaction:") {
                Some(emoji) if !emoji.is_empty() => Ok(Self::Reaction(emoji.to_string())),
                _ => Err(format!("invalid dimension: {s}")),
            },
        }
    }
}

/// The value an actor declared for one dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum StatusValue {
    Attendance(Rsvp),
    /// Membership in a reaction dimension's actor-set
    Reacted,
    Presence(PresenceStatus),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attendance(rsvp) => write!(f, "{rsvp}"),
            Self::Reacted => write!(f, "reacted"),
            Self::Presence(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "going" => Ok(Self::Attendance(Rsvp::Going)),
            "maybe" => Ok(Self::Attendance(Rsvp::Maybe)),
            "declined" => Ok(Self::Attendance(Rsvp::Declined)),
            "reacted" => Ok(Self::Reacted),
            "online" => Ok(Self::Presence(PresenceStatus::Online)),
            "away" => Ok(Self::Presence(PresenceStatus::Away)),
            "offline" => Ok(Self::Presence(PresenceStatus::Offline)),
            _ => Err(format!("invalid status value: {s}")),
        }
    }
}

impl From<Rsvp> for StatusValue {
    fn from(rsvp: Rsvp) -> Self {
        Self::Attendance(rsvp)
    }
}

impl From<PresenceStatus> for StatusValue {
    fn from(status: PresenceStatus) -> Self {
        Self::Presence(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_values() {
        assert!(Dimension::Attendance.accepts(&StatusValue::Attendance(Rsvp::Going)));
        assert!(Dimension::reaction("👍").accepts(&StatusValue::Reacted));
        assert!(Dimension::Presence.accepts(&StatusValue::Presence(PresenceStatus::Away)));
    }

    #[test]
    fn test_rejects_cross_dimension_values() {
        assert!(!Dimension::Attendance.accepts(&StatusValue::Reacted));
        assert!(!Dimension::reaction("👍").accepts(&StatusValue::Attendance(Rsvp::Maybe)));
        assert!(!Dimension::Presence.accepts(&StatusValue::Attendance(Rsvp::Going)));
    }

    #[test]
    fn test_dimension_wire_round_trip() {
        for dimension in [
            Dimension::Attendance,
            Dimension::Presence,
            Dimension::reaction("🎉"),
        ] {
            let encoded = dimension.to_string();
            assert_eq!(encoded.parse::<Dimension>().unwrap(), dimension);
        }
    }

    #[test]
    fn test_dimension_parse_rejects_empty_emoji() {
        assert!("reaction:".parse::<Dimension>().is_err());
        assert!("rsvp".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_value_wire_round_trip() {
        for value in [
            StatusValue::Attendance(Rsvp::Going),
            StatusValue::Attendance(Rsvp::Maybe),
            StatusValue::Attendance(Rsvp::Declined),
            StatusValue::Reacted,
            StatusValue::Presence(PresenceStatus::Online),
            StatusValue::Presence(PresenceStatus::Offline),
        ] {
            let encoded = value.to_string();
            assert_eq!(encoded.parse::<StatusValue>().unwrap(), value);
        }
    }

    #[test]
    fn test_presence_visibility() {
        assert!(PresenceStatus::Online.is_visible());
        assert!(PresenceStatus::Away.is_visible());
        assert!(!PresenceStatus::Offline.is_visible());
    }
}
