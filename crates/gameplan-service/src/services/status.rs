//! Status coordination service
//!
//! Applies a declaration to the ledger immediately (so the UI reflects it
//! with zero latency), pushes the write to the persistence collaborator
//! with one automatic retry, and reconciles on the outcome:
//!
//! - success: local state already matches, nothing to do
//! - terminal failure: roll the ledger back through the same primitives
//!   the optimistic apply used, and emit a failure notification
//! - stale resolution: a newer declaration claimed the key while this one
//!   was in flight; drop the outcome without touching the ledger

use tracing::{debug, info, instrument, trace, warn};

use gameplan_core::traits::RepoResult;
use gameplan_core::value_objects::{
    ActorId, Dimension, PresenceStatus, Rsvp, Snowflake, StatusValue,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Optimistic mutation coordinator
pub struct StatusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatusService<'a> {
    /// Create a new StatusService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Declare `value` for `(subject, actor)` in `dimension`
    ///
    /// The ledger is updated before this function first suspends. A value
    /// outside the dimension's enumeration aborts before any mutation.
    #[instrument(skip(self))]
    pub async fn declare_status(
        &self,
        subject: Snowflake,
        actor: ActorId,
        dimension: Dimension,
        value: StatusValue,
    ) -> ServiceResult<()> {
        self.sync_declaration(subject, actor, dimension, Some(value)).await
    }

    /// Retract the declaration for `(subject, actor)` in `dimension`
    ///
    /// Retracting an absent declaration is a local no-op and issues no
    /// collaborator write.
    #[instrument(skip(self))]
    pub async fn retract_status(
        &self,
        subject: Snowflake,
        actor: ActorId,
        dimension: Dimension,
    ) -> ServiceResult<()> {
        self.sync_declaration(subject, actor, dimension, None).await
    }

    /// RSVP to an event
    pub async fn declare_attendance(
        &self,
        event: Snowflake,
        actor: ActorId,
        rsvp: Rsvp,
    ) -> ServiceResult<()> {
        self.declare_status(event, actor, Dimension::Attendance, rsvp.into())
            .await
    }

    /// Update presence on a roster
    pub async fn declare_presence(
        &self,
        roster: Snowflake,
        actor: ActorId,
        status: PresenceStatus,
    ) -> ServiceResult<()> {
        self.declare_status(roster, actor, Dimension::Presence, status.into())
            .await
    }

    /// Toggle the actor's reaction with `emoji` on a message
    ///
    /// Reacting again with an emoji the actor already chose removes it;
    /// other emojis from the same actor are untouched. Returns whether the
    /// actor holds the reaction once the operation has settled.
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        message: Snowflake,
        actor: ActorId,
        emoji: &str,
    ) -> ServiceResult<bool> {
        let dimension = Dimension::reaction(emoji);
        let has_reacted = self
            .ctx
            .ledger()
            .get_status(message, &actor, &dimension)
            .is_some();

        let result = if has_reacted {
            self.sync_declaration(message, actor.clone(), dimension.clone(), None)
                .await
        } else {
            self.sync_declaration(
                message,
                actor.clone(),
                dimension.clone(),
                Some(StatusValue::Reacted),
            )
            .await
        };

        let settled = self
            .ctx
            .ledger()
            .get_status(message, &actor, &dimension)
            .is_some();
        result.map(|()| settled)
    }

    /// Reconcile local state against the authoritative store
    ///
    /// The fetched snapshot fully overwrites local guesses, and any write
    /// still in flight for the subject/dimension is abandoned so its
    /// resolution cannot roll back over the snapshot.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, subject: Snowflake, dimension: Dimension) -> ServiceResult<()> {
        let snapshot = self
            .ctx
            .store()
            .fetch_statuses(subject, &dimension)
            .await
            .map_err(ServiceError::from)?;

        self.ctx.abandon_sync(subject, &dimension);
        self.ctx.ledger().replace_all(subject, &dimension, snapshot)?;

        info!(subject = %subject, dimension = %dimension, "Reconciled from store");
        Ok(())
    }

    /// One optimistic cycle: local apply, collaborator write, resolution
    async fn sync_declaration(
        &self,
        subject: Snowflake,
        actor: ActorId,
        dimension: Dimension,
        target: Option<StatusValue>,
    ) -> ServiceResult<()> {
        // Step 1: apply locally, capturing the pre-image for rollback.
        // The guard drops before the first await.
        let previous = {
            let mut ledger = self.ctx.ledger();
            match &target {
                Some(value) => {
                    ledger.set_status(subject, actor.clone(), dimension.clone(), value.clone())?
                }
                None => match ledger.clear_status(subject, &actor, &dimension) {
                    Some(cleared) => Some(cleared),
                    // Nothing declared, nothing to retract
                    None => return Ok(()),
                },
            }
        };

        let key = (subject, actor.clone(), dimension.clone());
        let ticket = self.ctx.begin_sync(key.clone());

        // Step 2: push to the collaborator, one automatic retry.
        match self
            .write_with_retry(subject, &actor, &dimension, target.as_ref())
            .await
        {
            Ok(()) => {
                self.ctx.end_sync(&key, ticket);
                debug!(subject = %subject, actor = %actor, dimension = %dimension, "Status persisted");
                Ok(())
            }
            Err(err) => {
                if !self.ctx.is_current(&key, ticket) {
                    // A newer declaration owns this key; its value is the
                    // authoritative local intent now.
                    trace!(
                        subject = %subject,
                        dimension = %dimension,
                        "Stale resolution dropped"
                    );
                    return Ok(());
                }
                self.ctx.end_sync(&key, ticket);

                // Roll back through the same primitives the apply used, so
                // every projection sees the compensation the same way it
                // saw the optimistic change.
                {
                    let mut ledger = self.ctx.ledger();
                    match previous {
                        Some(value) => {
                            ledger.set_status(subject, actor.clone(), dimension.clone(), value)?;
                        }
                        None => {
                            ledger.clear_status(subject, &actor, &dimension);
                        }
                    }
                }

                warn!(
                    subject = %subject,
                    actor = %actor,
                    dimension = %dimension,
                    error = %err,
                    "Collaborator write failed terminally, rolled back"
                );
                self.ctx.notifier().failure(failure_message(&dimension));
                Err(err.into())
            }
        }
    }

    async fn write_with_retry(
        &self,
        subject: Snowflake,
        actor: &ActorId,
        dimension: &Dimension,
        value: Option<&StatusValue>,
    ) -> RepoResult<()> {
        let mut retries_left = self.ctx.engine().write_retries;
        loop {
            match self
                .ctx
                .store()
                .write_status(subject, actor, dimension, value)
                .await
            {
                Ok(()) => return Ok(()),
                Err(err) if retries_left > 0 => {
                    // Status replacement is idempotent, so replaying the
                    // same final value is harmless.
                    retries_left -= 1;
                    warn!(error = %err, "Collaborator write failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn failure_message(dimension: &Dimension) -> String {
    match dimension {
        Dimension::Attendance => "Your RSVP couldn't be saved. Please try again.".to_string(),
        Dimension::Reaction(_) => "Your reaction couldn't be saved. Please try again.".to_string(),
        Dimension::Presence => "Your status couldn't be updated. Please try again.".to_string(),
    }
}
