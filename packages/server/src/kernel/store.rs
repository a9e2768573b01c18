//! Entity store seam.
//!
//! All persistent records go through `BaseEntityStore`. Multi-record writes
//! use `begin()`; a transaction stages its writes and applies them atomically
//! on `commit`, while dropping it uncommitted discards them.

use async_trait::async_trait;

use crate::common::keys::{ConferenceKey, SessionKey, UserId};
use crate::domains::conference::models::Conference;
use crate::domains::conference::query::ConferenceQuery;
use crate::domains::profile::models::Profile;
use crate::domains::session::models::{Session, SessionFilter};
use crate::domains::speaker::models::Speaker;

/// Result of linking a speaker to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// First session for a brand-new speaker record.
    Created,
    /// Session appended to an existing speaker's roster.
    Appended,
    /// The roster already held this session; nothing changed.
    AlreadyLinked,
}

#[async_trait]
pub trait BaseEntityStore: Send + Sync {
    async fn get_profile(&self, user_id: &UserId) -> anyhow::Result<Option<Profile>>;
    async fn put_profile(&self, profile: &Profile) -> anyhow::Result<()>;

    async fn get_conference(&self, key: &ConferenceKey) -> anyhow::Result<Option<Conference>>;
    async fn put_conference(&self, conference: &Conference) -> anyhow::Result<()>;
    /// Conferences organized by one user, in creation order.
    async fn conferences_by_organizer(
        &self,
        organizer: &UserId,
    ) -> anyhow::Result<Vec<Conference>>;
    /// All conferences matching a formatted query, in the query's sort order.
    async fn query_conferences(&self, query: &ConferenceQuery)
        -> anyhow::Result<Vec<Conference>>;
    /// Conferences with `0 < seats_available <= threshold`.
    async fn conferences_with_low_seats(&self, threshold: i32)
        -> anyhow::Result<Vec<Conference>>;

    async fn get_session(&self, key: &SessionKey) -> anyhow::Result<Option<Session>>;
    async fn put_session(&self, session: &Session) -> anyhow::Result<()>;
    /// Sessions of one conference matching the filter, in creation order.
    async fn sessions_in_conference(
        &self,
        conference: &ConferenceKey,
        filter: &SessionFilter,
    ) -> anyhow::Result<Vec<Session>>;
    /// Exact-name matches within one conference.
    async fn find_sessions_by_name(
        &self,
        conference: &ConferenceKey,
        name: &str,
    ) -> anyhow::Result<Vec<Session>>;

    async fn get_speaker(&self, name: &str) -> anyhow::Result<Option<Speaker>>;
    /// All speakers, ordered by name.
    async fn speakers(&self) -> anyhow::Result<Vec<Speaker>>;
    /// Add a session to a speaker's roster, creating the speaker on first
    /// contact. Idempotence is reported, not an error.
    async fn link_speaker(
        &self,
        name: &str,
        session: &SessionKey,
    ) -> anyhow::Result<LinkOutcome>;

    async fn begin(&self) -> anyhow::Result<Box<dyn StoreTransaction>>;
}

/// Staged writes over profiles and conferences. Reads observe earlier writes
/// staged in the same transaction.
#[async_trait]
pub trait StoreTransaction: Send {
    async fn get_profile(&mut self, user_id: &UserId) -> anyhow::Result<Option<Profile>>;
    async fn put_profile(&mut self, profile: &Profile) -> anyhow::Result<()>;
    async fn get_conference(&mut self, key: &ConferenceKey)
        -> anyhow::Result<Option<Conference>>;
    async fn put_conference(&mut self, conference: &Conference) -> anyhow::Result<()>;
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}
