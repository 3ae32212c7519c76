//! StatusRecordModel ↔ StatusRecord mapping
//!
//! The conversion from a row is fallible: the text encoding is parsed and
//! the value is checked against the dimension's closed enumeration, so a
//! corrupted row surfaces as `InvalidStatusEncoding` instead of leaking
//! into the ledger.

use gameplan_core::error::DomainError;
use gameplan_core::value_objects::{ActorId, Dimension, Snowflake, StatusValue};
use gameplan_core::StatusRecord;

use crate::models::StatusRecordModel;

impl TryFrom<StatusRecordModel> for StatusRecord {
    type Error = DomainError;

    fn try_from(model: StatusRecordModel) -> Result<Self, Self::Error> {
        let dimension: Dimension = model
            .dimension
            .parse()
            .map_err(DomainError::InvalidStatusEncoding)?;
        let value: StatusValue = model
            .value
            .parse()
            .map_err(DomainError::InvalidStatusEncoding)?;

        if !dimension.accepts(&value) {
            return Err(DomainError::InvalidStatusEncoding(format!(
                "value '{}' outside dimension '{}'",
                model.value, model.dimension
            )));
        }

        Ok(StatusRecord {
            subject_id: Snowflake::new(model.subject_id),
            actor_id: ActorId::new(model.actor_id),
            value,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(dimension: &str, value: &str) -> StatusRecordModel {
        StatusRecordModel {
            subject_id: 7,
            actor_id: "usr_a".to_string(),
            dimension: dimension.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row_maps() {
        let record = StatusRecord::try_from(model("attendance", "going")).unwrap();
        assert_eq!(record.subject_id, Snowflake::new(7));
        assert_eq!(record.value.to_string(), "going");
    }

    #[test]
    fn test_reaction_dimension_maps() {
        let record = StatusRecord::try_from(model("reaction:👍", "reacted")).unwrap();
        assert_eq!(record.value, StatusValue::Reacted);
    }

    #[test]
    fn test_corrupted_rows_rejected() {
        assert!(StatusRecord::try_from(model("attendance", "reacted")).is_err());
        assert!(StatusRecord::try_from(model("nonsense", "going")).is_err());
        assert!(StatusRecord::try_from(model("presence", "nonsense")).is_err());
    }
}
