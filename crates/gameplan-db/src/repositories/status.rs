//! PostgreSQL implementation of StatusStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gameplan_core::traits::{RepoResult, StatusStore};
use gameplan_core::value_objects::{ActorId, Dimension, Snowflake, StatusValue};
use gameplan_core::{Message, StatusRecord};

use crate::models::StatusRecordModel;

use super::error::map_db_error;

/// PostgreSQL implementation of the persistence collaborator
///
/// The unique index on (subject_id, actor_id, dimension) makes
/// `write_status` an upsert, so replaying the same final value (the
/// coordinator's one retry) is harmless.
#[derive(Clone)]
pub struct PgStatusStore {
    pool: PgPool,
}

impl PgStatusStore {
    /// Create a new PgStatusStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStore for PgStatusStore {
    #[instrument(skip(self))]
    async fn write_status(
        &self,
        subject: Snowflake,
        actor: &ActorId,
        dimension: &Dimension,
        value: Option<&StatusValue>,
    ) -> RepoResult<()> {
        match value {
            Some(value) => {
                sqlx::query(
                    r#"
                    INSERT INTO status_records (subject_id, actor_id, dimension, value, updated_at)
                    VALUES ($1, $2, $3, $4, NOW())
                    ON CONFLICT (subject_id, actor_id, dimension)
                    DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
                    "#,
                )
                .bind(subject.into_inner())
                .bind(actor.as_str())
                .bind(dimension.to_string())
                .bind(value.to_string())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;
            }
            None => {
                sqlx::query(
                    r#"
                    DELETE FROM status_records
                    WHERE subject_id = $1 AND actor_id = $2 AND dimension = $3
                    "#,
                )
                .bind(subject.into_inner())
                .bind(actor.as_str())
                .bind(dimension.to_string())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;
            }
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_statuses(
        &self,
        subject: Snowflake,
        dimension: &Dimension,
    ) -> RepoResult<Vec<StatusRecord>> {
        let rows = sqlx::query_as::<_, StatusRecordModel>(
            r#"
            SELECT subject_id, actor_id, dimension, value, updated_at
            FROM status_records
            WHERE subject_id = $1 AND dimension = $2
            "#,
        )
        .bind(subject.into_inner())
        .bind(dimension.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(StatusRecord::try_from).collect()
    }

    #[instrument(skip(self, message))]
    async fn append_message(&self, channel: Snowflake, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, channel_id, author_id, body, created_at, pinned, thread_reply_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(message.id.into_inner())
        .bind(channel.into_inner())
        .bind(message.author_id.as_str())
        .bind(&message.body)
        .bind(message.created_at)
        .bind(message.pinned)
        .bind(message.thread_reply_count as i32)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgStatusStore>();
    }
}
