//! In-process entity store.
//!
//! State lives behind one async mutex. A transaction takes the mutex for its
//! whole lifetime and stages writes in side maps, so transactions serialize
//! against each other and against plain writes; commit folds the staged maps
//! into the state, dropping the guard uncommitted discards them.
//!
//! While a transaction is open its task must not call the non-transactional
//! methods, they would block on the same mutex.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::common::keys::{ConferenceKey, SessionKey, UserId};
use crate::domains::conference::models::Conference;
use crate::domains::conference::query::ConferenceQuery;
use crate::domains::profile::models::Profile;
use crate::domains::session::models::{Session, SessionFilter};
use crate::domains::speaker::models::Speaker;
use crate::kernel::store::{BaseEntityStore, LinkOutcome, StoreTransaction};

#[derive(Default)]
struct StoreState {
    profiles: HashMap<UserId, Profile>,
    conferences: HashMap<ConferenceKey, Conference>,
    sessions: HashMap<SessionKey, Session>,
    speakers: BTreeMap<String, Speaker>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseEntityStore for MemoryStore {
    async fn get_profile(&self, user_id: &UserId) -> anyhow::Result<Option<Profile>> {
        Ok(self.state.lock().await.profiles.get(user_id).cloned())
    }

    async fn put_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        self.state
            .lock()
            .await
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_conference(&self, key: &ConferenceKey) -> anyhow::Result<Option<Conference>> {
        Ok(self.state.lock().await.conferences.get(key).cloned())
    }

    async fn put_conference(&self, conference: &Conference) -> anyhow::Result<()> {
        self.state
            .lock()
            .await
            .conferences
            .insert(conference.key.clone(), conference.clone());
        Ok(())
    }

    async fn conferences_by_organizer(
        &self,
        organizer: &UserId,
    ) -> anyhow::Result<Vec<Conference>> {
        let state = self.state.lock().await;
        let mut conferences: Vec<Conference> = state
            .conferences
            .values()
            .filter(|c| &c.key.organizer == organizer)
            .cloned()
            .collect();
        // Ids are time-ordered, so this is creation order.
        conferences.sort_by_key(|c| c.key.id);
        Ok(conferences)
    }

    async fn query_conferences(
        &self,
        query: &ConferenceQuery,
    ) -> anyhow::Result<Vec<Conference>> {
        let state = self.state.lock().await;
        let mut conferences: Vec<Conference> = state
            .conferences
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        query.sort(&mut conferences);
        Ok(conferences)
    }

    async fn conferences_with_low_seats(
        &self,
        threshold: i32,
    ) -> anyhow::Result<Vec<Conference>> {
        let state = self.state.lock().await;
        let mut conferences: Vec<Conference> = state
            .conferences
            .values()
            .filter(|c| c.seats_available > 0 && c.seats_available <= threshold)
            .cloned()
            .collect();
        conferences.sort_by_key(|c| c.key.id);
        Ok(conferences)
    }

    async fn get_session(&self, key: &SessionKey) -> anyhow::Result<Option<Session>> {
        Ok(self.state.lock().await.sessions.get(key).cloned())
    }

    async fn put_session(&self, session: &Session) -> anyhow::Result<()> {
        self.state
            .lock()
            .await
            .sessions
            .insert(session.key.clone(), session.clone());
        Ok(())
    }

    async fn sessions_in_conference(
        &self,
        conference: &ConferenceKey,
        filter: &SessionFilter,
    ) -> anyhow::Result<Vec<Session>> {
        let state = self.state.lock().await;
        let mut sessions: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| &s.key.conference == conference && filter.matches(s))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.key.id);
        Ok(sessions)
    }

    async fn find_sessions_by_name(
        &self,
        conference: &ConferenceKey,
        name: &str,
    ) -> anyhow::Result<Vec<Session>> {
        let state = self.state.lock().await;
        let mut sessions: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| &s.key.conference == conference && s.name == name)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.key.id);
        Ok(sessions)
    }

    async fn get_speaker(&self, name: &str) -> anyhow::Result<Option<Speaker>> {
        Ok(self.state.lock().await.speakers.get(name).cloned())
    }

    async fn speakers(&self) -> anyhow::Result<Vec<Speaker>> {
        Ok(self.state.lock().await.speakers.values().cloned().collect())
    }

    async fn link_speaker(
        &self,
        name: &str,
        session: &SessionKey,
    ) -> anyhow::Result<LinkOutcome> {
        let mut state = self.state.lock().await;
        match state.speakers.get_mut(name) {
            Some(speaker) => {
                if speaker.session_keys.contains(session) {
                    Ok(LinkOutcome::AlreadyLinked)
                } else {
                    speaker.session_keys.push(session.clone());
                    Ok(LinkOutcome::Appended)
                }
            }
            None => {
                let mut speaker = Speaker::new(name);
                speaker.session_keys.push(session.clone());
                state.speakers.insert(name.to_string(), speaker);
                Ok(LinkOutcome::Created)
            }
        }
    }

    async fn begin(&self) -> anyhow::Result<Box<dyn StoreTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(MemoryTransaction {
            guard,
            staged_profiles: HashMap::new(),
            staged_conferences: HashMap::new(),
        }))
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    staged_profiles: HashMap<UserId, Profile>,
    staged_conferences: HashMap<ConferenceKey, Conference>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn get_profile(&mut self, user_id: &UserId) -> anyhow::Result<Option<Profile>> {
        if let Some(staged) = self.staged_profiles.get(user_id) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.guard.profiles.get(user_id).cloned())
    }

    async fn put_profile(&mut self, profile: &Profile) -> anyhow::Result<()> {
        self.staged_profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_conference(
        &mut self,
        key: &ConferenceKey,
    ) -> anyhow::Result<Option<Conference>> {
        if let Some(staged) = self.staged_conferences.get(key) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.guard.conferences.get(key).cloned())
    }

    async fn put_conference(&mut self, conference: &Conference) -> anyhow::Result<()> {
        self.staged_conferences
            .insert(conference.key.clone(), conference.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> anyhow::Result<()> {
        for (user_id, profile) in self.staged_profiles.drain() {
            self.guard.profiles.insert(user_id, profile);
        }
        for (key, conference) in self.staged_conferences.drain() {
            self.guard.conferences.insert(key, conference);
        }
        Ok(())
    }
}
