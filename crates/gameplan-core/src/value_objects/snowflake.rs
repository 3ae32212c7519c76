//! Snowflake ID - 64-bit time-ordered identifier for subjects and messages
//!
//! Layout: the upper 42 bits carry milliseconds since a custom epoch, the
//! middle 10 bits a machine id, the low 12 bits a per-millisecond sequence.
//! Sorting by id therefore sorts by creation time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const TIMESTAMP_SHIFT: u8 = 22;
const MACHINE_SHIFT: u8 = 12;
const SEQUENCE_MASK: i64 = 0xFFF;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1735689600000;

    /// Wrap a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check whether the id is zero (uninitialized)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch encoded in the id
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    /// Creation time as a `DateTime<Utc>`
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp_millis()).unwrap_or_default()
    }

    /// Parse from the decimal string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialized as a string so ids survive JSON round-trips through JavaScript
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a snowflake id as string or integer")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
                Ok(Snowflake(value as i64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
                Snowflake::parse(value).map_err(|_| de::Error::custom("invalid snowflake string"))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Lock-free generator for locally minted ids
///
/// Packs the last-issued (timestamp, sequence) pair into one atomic word;
/// a CAS loop claims the next slot. If the clock reads behind the last
/// issued timestamp the generator stays on the logical clock, so ids are
/// strictly monotonic per process.
pub struct SnowflakeGenerator {
    machine_id: u16,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator with the given machine id
    ///
    /// # Panics
    /// Panics if `machine_id >= 1024`
    pub fn new(machine_id: u16) -> Self {
        assert!(machine_id < 1024, "machine id must be < 1024");
        Self {
            machine_id,
            state: AtomicI64::new(0),
        }
    }

    /// Mint the next id
    pub fn generate(&self) -> Snowflake {
        loop {
            let state = self.state.load(Ordering::Acquire);
            let (last_ts, seq) = (state >> MACHINE_SHIFT, state & SEQUENCE_MASK);
            let now = Self::clock_millis().max(last_ts);

            let (ts, next_seq) = if now > last_ts {
                (now, 0)
            } else if seq < SEQUENCE_MASK {
                (last_ts, seq + 1)
            } else {
                // Sequence exhausted within one millisecond; borrow the next one
                (last_ts + 1, 0)
            };

            let next_state = (ts << MACHINE_SHIFT) | next_seq;
            if self
                .state
                .compare_exchange(state, next_state, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let raw = ((ts - Snowflake::EPOCH) << TIMESTAMP_SHIFT)
                    | (i64::from(self.machine_id) << MACHINE_SHIFT)
                    | next_seq;
                return Snowflake::new(raw);
            }
        }
    }

    /// Machine id of this generator
    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    #[inline]
    fn clock_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_trip() {
        let id = Snowflake::new(987654321);
        assert_eq!(id.into_inner(), 987654321);
        assert_eq!(id.to_string(), "987654321");
        assert_eq!(Snowflake::parse("987654321").unwrap(), id);
    }

    #[test]
    fn test_zero() {
        assert!(Snowflake::default().is_zero());
        assert!(!Snowflake::new(1).is_zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Snowflake::parse("not-a-number").is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let id = Snowflake::new(123456789012345678);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123456789012345678\"");
    }

    #[test]
    fn test_deserialize_string_or_number() {
        let from_str: Snowflake = serde_json::from_str("\"42\"").unwrap();
        let from_num: Snowflake = serde_json::from_str("42").unwrap();
        assert_eq!(from_str, from_num);
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(Snowflake::new(100) < Snowflake::new(200));
    }

    #[test]
    fn test_generator_unique_and_monotonic() {
        let generator = SnowflakeGenerator::new(3);
        let mut seen = HashSet::new();
        let mut last = Snowflake::default();

        for _ in 0..2000 {
            let id = generator.generate();
            assert!(seen.insert(id), "duplicate id minted");
            assert!(id > last, "ids must be strictly increasing");
            last = id;
        }
    }

    #[test]
    fn test_generated_timestamp_in_window() {
        let generator = SnowflakeGenerator::default();
        let before = SnowflakeGenerator::clock_millis();
        let id = generator.generate();
        let after = SnowflakeGenerator::clock_millis();
        assert!(id.timestamp_millis() >= before && id.timestamp_millis() <= after + 1);
    }

    #[test]
    #[should_panic(expected = "machine id must be < 1024")]
    fn test_generator_rejects_wide_machine_id() {
        SnowflakeGenerator::new(1024);
    }
}
