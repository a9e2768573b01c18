//! Featured-speaker cache.
//!
//! Whenever a speaker gains a session, a job recounts their sessions within
//! that conference. Two or more make them the featured speaker; fewer leave
//! whatever the cache already holds, so the entry only ever moves forward to
//! a currently-qualifying speaker.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::errors::ApiResult;
use crate::common::keys::ConferenceKey;
use crate::kernel::jobs::{JobCommand, JobHandler, JobRegistry};
use crate::kernel::ServerDeps;

pub const FEATURED_SPEAKER_CACHE_KEY: &str = "FEATURED_SPEAKER";

/// Cached featured-speaker value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSpeaker {
    pub speaker: String,
    pub session_names: Vec<String>,
}

/// Command queued by the session/speaker linker after a link lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshFeaturedSpeaker {
    pub speaker: String,
    pub websafe_conference_key: String,
}

impl JobCommand for RefreshFeaturedSpeaker {
    const JOB_TYPE: &'static str = "refresh_featured_speaker";
}

/// Recount the speaker's sessions in the conference and promote them to
/// featured speaker when two or more exist.
pub async fn refresh_featured_speaker(
    deps: &ServerDeps,
    speaker_name: &str,
    conference_key: &ConferenceKey,
) -> ApiResult<()> {
    let speaker = match deps.store.get_speaker(speaker_name).await? {
        Some(speaker) => speaker,
        None => {
            tracing::debug!(speaker = speaker_name, "speaker has no sessions, cache unchanged");
            return Ok(());
        }
    };

    let mut session_names = Vec::new();
    for key in &speaker.session_keys {
        if &key.conference != conference_key {
            continue;
        }
        match deps.store.get_session(key).await? {
            Some(session) => session_names.push(session.name),
            None => {
                tracing::warn!(session = %key.websafe(), "linked session no longer exists")
            }
        }
    }

    if session_names.len() < 2 {
        tracing::debug!(
            speaker = speaker_name,
            sessions = session_names.len(),
            "speaker does not qualify, cache unchanged"
        );
        return Ok(());
    }

    let featured = FeaturedSpeaker {
        speaker: speaker.name,
        session_names,
    };
    let value = serde_json::to_value(&featured).map_err(anyhow::Error::from)?;
    deps.cache.set(FEATURED_SPEAKER_CACHE_KEY, value).await?;
    tracing::info!(speaker = speaker_name, "featured speaker updated");
    Ok(())
}

/// Read the current featured speaker from the cache, if any.
pub async fn get_featured_speaker(deps: &ServerDeps) -> ApiResult<Option<FeaturedSpeaker>> {
    let cached = deps.cache.get(FEATURED_SPEAKER_CACHE_KEY).await?;
    Ok(cached.and_then(|value| serde_json::from_value(value).ok()))
}

struct RefreshFeaturedSpeakerHandler {
    deps: ServerDeps,
}

#[async_trait]
impl JobHandler for RefreshFeaturedSpeakerHandler {
    async fn execute(&self, params: serde_json::Value) -> anyhow::Result<()> {
        let command: RefreshFeaturedSpeaker = serde_json::from_value(params)?;
        let conference_key = ConferenceKey::from_websafe(&command.websafe_conference_key)?;
        refresh_featured_speaker(&self.deps, &command.speaker, &conference_key).await?;
        Ok(())
    }
}

pub fn register_jobs(registry: &mut JobRegistry, deps: &ServerDeps) {
    registry
        .register::<RefreshFeaturedSpeaker>(RefreshFeaturedSpeakerHandler { deps: deps.clone() });
}
