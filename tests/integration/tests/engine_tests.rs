//! End-to-end scenarios for the status engine
//!
//! Each test drives the services the way the presentation layer would and
//! asserts on projections, unread snapshots, and emitted notifications.

use gameplan_core::ledger::{attendance_tally, reaction_summary};
use gameplan_core::value_objects::{ActorId, Dimension, PresenceStatus, Rsvp};
use gameplan_core::{Channel, NotificationKind, StatusRecord, StatusValue, TeamEvent};
use gameplan_service::{
    FeedService, PresenceService, StatusService, UnreadService,
};
use integration_tests::{engine, message_at_minute, roster_members, timeline_start, unique_id};

#[tokio::test]
async fn rsvp_rollback_restores_previous_answer_and_notifies() {
    let harness = engine();
    let event = unique_id();
    let actor = ActorId::new("usr_sarah");
    let service = StatusService::new(&harness.ctx);

    // going: 1, maybe: 0, declined: 0
    service
        .declare_attendance(event, actor.clone(), Rsvp::Going)
        .await
        .unwrap();
    {
        let tally = attendance_tally(&harness.ctx.ledger(), event);
        assert_eq!((tally.going, tally.maybe, tally.declined), (1, 0, 0));
    }

    // The switch to maybe fails on the initial attempt and the one retry
    let mut feedback = harness.ctx.notifier().subscribe();
    harness.store.fail_next_writes(2);
    let result = service.declare_attendance(event, actor.clone(), Rsvp::Maybe).await;
    assert!(result.is_err());

    // Rolled back to the pre-mutation answer
    let tally = attendance_tally(&harness.ctx.ledger(), event);
    assert_eq!((tally.going, tally.maybe, tally.declined), (1, 0, 0));

    // And the failure reached the notification surface
    let notification = feedback.recv().await.unwrap();
    assert_eq!(notification.kind, NotificationKind::Failure);
    assert_eq!(harness.ctx.notifier().unread_count(), 1);
}

#[tokio::test]
async fn event_card_tally_tracks_capacity() {
    let harness = engine();
    let event = TeamEvent::new(
        unique_id(),
        "Weekend Practice".to_string(),
        timeline_start(),
    )
    .with_location("Central Park Track")
    .with_capacity(12);
    let service = StatusService::new(&harness.ctx);

    for (actor, answer) in [
        ("usr_alex", Rsvp::Going),
        ("usr_sarah", Rsvp::Going),
        ("usr_mike", Rsvp::Maybe),
        ("usr_jenny", Rsvp::Declined),
    ] {
        service
            .declare_attendance(event.id, ActorId::new(actor), answer)
            .await
            .unwrap();
    }

    let tally = attendance_tally(&harness.ctx.ledger(), event.id);
    assert_eq!((tally.going, tally.maybe, tally.declined), (2, 1, 1));
    assert_eq!(tally.responses(), 4);
    assert_eq!(tally.spots_left(event.capacity), Some(10));
}

#[tokio::test]
async fn selecting_a_channel_zeroes_it_and_global_follows() {
    let harness = engine();
    let general = Channel::new(unique_id(), "general")
        .with_description("General team discussion and announcements");
    let social = Channel::new(unique_id(), "social");
    let feed = FeedService::new(&harness.ctx);
    let unread = UnreadService::new(&harness.ctx);

    for i in 0..3 {
        feed.ingest_remote(message_at_minute(general.id, "usr_mike", i, "in general"));
    }
    for i in 0..5 {
        feed.ingest_remote(message_at_minute(social.id, "usr_mike", i, "in social"));
    }
    assert_eq!(unread.unread(general.id), 3);
    assert_eq!(unread.unread(social.id), 5);
    assert_eq!(unread.global_unread(), 8);

    unread.channel_selected(general.id);
    assert_eq!(unread.unread(general.id), 0);
    assert_eq!(unread.global_unread(), 5);
    assert_eq!(unread.snapshot().active_channel, Some(general.id));

    // Arrivals in the now-active channel never count
    feed.ingest_remote(message_at_minute(general.id, "usr_mike", 30, "while active"));
    assert_eq!(unread.unread(general.id), 0);
    assert_eq!(unread.global_unread(), 5);
}

#[tokio::test]
async fn grouping_splits_at_the_five_minute_window() {
    let harness = engine();
    let channel = unique_id();
    let feed = FeedService::new(&harness.ctx);

    // t = 0,1,2,3,9 by one author: gap 3 -> 9 is 6 >= 5, so the run breaks
    for minute in [0, 1, 2, 3, 9] {
        feed.ingest_remote(message_at_minute(channel, "usr_alex", minute, "drill update"));
    }

    let groups = feed.grouped(channel);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 4);
    assert_eq!(groups[1].len(), 1);

    // Recomputation over the same timeline is idempotent
    assert_eq!(feed.grouped(channel), groups);
}

#[tokio::test]
async fn reactions_tally_per_actor_and_round_trip() {
    let harness = engine();
    let channel = unique_id();
    let feed = FeedService::new(&harness.ctx);
    let service = StatusService::new(&harness.ctx);

    let message = feed
        .post_message(channel, ActorId::new("usr_alex"), "great race everyone".to_string())
        .await
        .unwrap();

    let u = ActorId::new("usr_sarah");
    let v = ActorId::new("usr_mike");

    // First 👍 creates the entry
    assert!(service.toggle_reaction(message.id, u.clone(), "👍").await.unwrap());
    {
        let summary = reaction_summary(&harness.ctx.ledger(), message.id, &u);
        assert_eq!((summary[0].emoji.as_str(), summary[0].count, summary[0].me), ("👍", 1, true));
    }

    // A second, distinct actor raises the count without touching U's flag
    assert!(service.toggle_reaction(message.id, v.clone(), "👍").await.unwrap());
    {
        let summary = reaction_summary(&harness.ctx.ledger(), message.id, &u);
        assert_eq!((summary[0].count, summary[0].me), (2, true));
    }

    // Toggling twice returns U to the pre-toggle state
    assert!(!service.toggle_reaction(message.id, u.clone(), "👍").await.unwrap());
    assert!(service.toggle_reaction(message.id, u.clone(), "👍").await.unwrap());
    let summary = reaction_summary(&harness.ctx.ledger(), message.id, &u);
    assert_eq!((summary[0].count, summary[0].me), (2, true));
}

#[tokio::test]
async fn reconciliation_fully_overwrites_local_state() {
    let harness = engine();
    let event = unique_id();
    let service = StatusService::new(&harness.ctx);

    // Authoritative store: two answers the client has never seen
    for (actor, answer) in [("usr_alex", Rsvp::Going), ("usr_jenny", Rsvp::Declined)] {
        harness.store.seed_record(
            StatusRecord::new(
                event,
                ActorId::new(actor),
                StatusValue::Attendance(answer),
            ),
            Dimension::Attendance,
        );
    }

    // Local guess that never persisted
    harness
        .ctx
        .ledger()
        .set_status(
            event,
            ActorId::new("usr_sarah"),
            Dimension::Attendance,
            StatusValue::Attendance(Rsvp::Maybe),
        )
        .unwrap();

    service.reconcile(event, Dimension::Attendance).await.unwrap();

    let tally = attendance_tally(&harness.ctx.ledger(), event);
    assert_eq!((tally.going, tally.maybe, tally.declined), (1, 0, 1));
}

#[tokio::test]
async fn presence_partition_covers_the_roster() {
    let harness = engine();
    let roster = unique_id();
    let members = roster_members();
    let presence = PresenceService::new(&harness.ctx);

    presence
        .declare_presence(roster, ActorId::new("usr_alex"), PresenceStatus::Online)
        .await
        .unwrap();
    presence
        .declare_presence(roster, ActorId::new("usr_sarah"), PresenceStatus::Online)
        .await
        .unwrap();
    presence
        .declare_presence(roster, ActorId::new("usr_mike"), PresenceStatus::Away)
        .await
        .unwrap();

    let partition = presence.partition(roster, &members);
    assert_eq!(partition.total(), members.len());
    assert_eq!(partition.online.len(), 2);
    assert_eq!(partition.away.len(), 1);
    // usr_jenny never declared anything and lands offline
    assert_eq!(partition.offline.len(), 1);
    assert_eq!(partition.offline[0].actor_id, ActorId::new("usr_jenny"));

    // Re-declaration moves the member on the next full recomputation
    presence
        .declare_presence(roster, ActorId::new("usr_alex"), PresenceStatus::Away)
        .await
        .unwrap();
    let partition = presence.partition(roster, &members);
    assert_eq!(partition.online.len(), 1);
    assert_eq!(partition.away.len(), 2);
}

#[tokio::test]
async fn digest_counts_are_exact_over_the_unread_window() {
    let harness = engine();
    let general = unique_id();
    let planning = unique_id();
    let feed = FeedService::new(&harness.ctx);
    let unread = UnreadService::new(&harness.ctx);

    unread.channel_selected(general);

    feed.ingest_remote(message_at_minute(planning, "usr_alex", 0, "schedule is up"));
    feed.ingest_remote(message_at_minute(planning, "usr_alex", 1, "@sarah can you bring cones?"));
    feed.ingest_remote(message_at_minute(planning, "usr_mike", 2, "I'm out this week"));

    let digest = unread.digest(planning, "sarah");
    assert_eq!(digest.message_count, 3);
    assert_eq!(digest.mention_count, 1);
    assert!(digest.highlights.len() <= 3);

    // Selecting the channel consumes the window
    unread.channel_selected(planning);
    let digest = unread.digest(planning, "sarah");
    assert!(digest.is_empty());
    assert_eq!(digest.mention_count, 0);
}

#[tokio::test]
async fn failed_message_post_leaves_no_trace_in_views() {
    let harness = engine();
    let channel = unique_id();
    let feed = FeedService::new(&harness.ctx);

    feed.ingest_remote(message_at_minute(channel, "usr_mike", 0, "kept"));

    harness.store.fail_next_writes(2);
    let result = feed
        .post_message(channel, ActorId::new("usr_sarah"), "dropped".to_string())
        .await;
    assert!(result.is_err());

    let bodies: Vec<String> = feed.messages(channel).into_iter().map(|m| m.body).collect();
    assert_eq!(bodies, vec!["kept".to_string()]);
    assert_eq!(feed.grouped(channel).len(), 1);
    assert_eq!(harness.ctx.notifier().failure_count(), 1);
}
