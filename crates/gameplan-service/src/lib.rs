//! # gameplan-service
//!
//! Application layer for the status engine: the optimistic mutation
//! coordinator, message feed, unread/digest tracking, grouping and
//! presence partitioning, and the notification surface.

pub mod services;

pub use services::{
    build_digest, group_messages, partition_members, ChannelDigest, FeedService, InboxItem,
    MessageGroup, Notifier, PresenceRoster, PresenceService, ServiceContext, ServiceError,
    ServiceResult, StatusService, UnreadService, UnreadSnapshot, UnreadTracker,
};
