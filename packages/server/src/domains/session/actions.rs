//! Session creation, listing and the session/speaker linker.
//!
//! Creating a session whose name already exists inside the same conference
//! updates that session instead of inserting a duplicate. When the incoming
//! speaker differs from the stored one the new speaker is linked in addition,
//! and a featured-speaker refresh job is queued for them.

use crate::common::errors::{ApiError, ApiResult};
use crate::common::keys::{ConferenceKey, SessionKey};
use crate::domains::conference::models::parse_date;
use crate::domains::session::data::{CreateSessionInput, SessionData, SessionFilterInput};
use crate::domains::session::models::{
    parse_time, Session, SessionRole, SessionType, DEFAULT_DURATION_MINUTES,
};
use crate::domains::speaker::featured::RefreshFeaturedSpeaker;
use crate::kernel::jobs::enqueue;
use crate::kernel::{Identity, LinkOutcome, ServerDeps};

fn conference_not_found(websafe_key: &str) -> ApiError {
    ApiError::NotFound(format!("No conference found with key: {websafe_key}"))
}

fn resolve_conference_key(websafe_key: &str) -> ApiResult<ConferenceKey> {
    ConferenceKey::from_websafe(websafe_key).map_err(|_| conference_not_found(websafe_key))
}

/// Create (or update, on a name collision) a session in a conference. Only
/// the conference organizer may create sessions.
pub async fn create_session(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_conference_key: &str,
    input: CreateSessionInput,
) -> ApiResult<SessionData> {
    let conference_key = resolve_conference_key(websafe_conference_key)?;
    let conference = deps
        .store
        .get_conference(&conference_key)
        .await?
        .ok_or_else(|| conference_not_found(websafe_conference_key))?;

    if conference.key.organizer != identity.user_id {
        return Err(ApiError::Forbidden(
            "Only the owner of the conference can create new sessions.".to_string(),
        ));
    }

    let name = match input.session_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            return Err(ApiError::BadRequest(
                "Session 'sessionName' field required".to_string(),
            ))
        }
    };
    let speaker = match input.speaker {
        Some(speaker) if !speaker.trim().is_empty() => speaker,
        _ => {
            return Err(ApiError::BadRequest(
                "Session 'speaker' field required".to_string(),
            ))
        }
    };

    let type_of_session = input
        .type_of_session
        .as_deref()
        .map(|value| {
            SessionType::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown session type: {value}")))
        })
        .transpose()?;
    let role = input
        .role
        .as_deref()
        .map(|value| {
            SessionRole::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown session role: {value}")))
        })
        .transpose()?;
    let date = input.date.as_deref().map(parse_date).transpose()?;
    let start_time = input.start_time.as_deref().map(parse_time).transpose()?;

    // Name collision inside the same conference means update, not insert.
    // Resubmitting the stored speaker unchanged is a no-op.
    let existing = deps
        .store
        .find_sessions_by_name(&conference_key, &name)
        .await?
        .into_iter()
        .next();

    let mut session = match existing {
        Some(session) if session.speaker.as_deref() == Some(speaker.as_str()) => {
            return Ok(SessionData::from(session))
        }
        Some(session) => session,
        None => Session {
            key: SessionKey::allocate(conference_key.clone()),
            name: name.clone(),
            highlights: None,
            type_of_session: SessionType::default(),
            speaker: None,
            role: SessionRole::default(),
            location: None,
            date: None,
            start_time: None,
            duration: DEFAULT_DURATION_MINUTES,
        },
    };

    session.speaker = Some(speaker.clone());
    session.highlights = input.highlights.or(session.highlights);
    if let Some(type_of_session) = type_of_session {
        session.type_of_session = type_of_session;
    }
    if let Some(role) = role {
        session.role = role;
    }
    session.location = input.location.or(session.location);
    session.date = date.or(session.date);
    session.start_time = start_time.or(session.start_time);
    if let Some(duration) = input.duration {
        session.duration = duration;
    }

    deps.store.put_session(&session).await?;
    tracing::info!(
        session = %session.key.websafe(),
        conference = %conference_key.websafe(),
        "session saved"
    );

    link_speaker_and_refresh(deps, &speaker, &session.key).await?;

    Ok(SessionData::from(session))
}

/// Record the session against the speaker's roster and queue the
/// featured-speaker refresh. A speaker already on the session is a conflict.
pub async fn link_speaker_and_refresh(
    deps: &ServerDeps,
    speaker: &str,
    session_key: &SessionKey,
) -> ApiResult<()> {
    let outcome = deps.store.link_speaker(speaker, session_key).await?;
    if outcome == LinkOutcome::AlreadyLinked {
        return Err(ApiError::Conflict(
            "Speaker is already part of session".to_string(),
        ));
    }

    let command = RefreshFeaturedSpeaker {
        speaker: speaker.to_string(),
        websafe_conference_key: session_key.conference.websafe(),
    };
    // Cache refresh is best effort; a queue failure must not lose the link.
    if let Err(error) = enqueue(deps.jobs.as_ref(), &command).await {
        tracing::error!(%error, speaker, "failed to queue featured speaker refresh");
    }

    Ok(())
}

/// Add a named speaker to an existing session.
pub async fn add_speaker(
    deps: &ServerDeps,
    name: &str,
    websafe_session_key: &str,
) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Session 'speaker' field required".to_string(),
        ));
    }
    let session_key = SessionKey::from_websafe(websafe_session_key).map_err(|_| {
        ApiError::NotFound(format!("No session found with key: {websafe_session_key}"))
    })?;
    let mut session = deps.store.get_session(&session_key).await?.ok_or_else(|| {
        ApiError::NotFound(format!("No session found with key: {websafe_session_key}"))
    })?;

    link_speaker_and_refresh(deps, name, &session_key).await?;

    if session.speaker.is_none() {
        session.speaker = Some(name.to_string());
        deps.store.put_session(&session).await?;
    }
    Ok(())
}

/// Sessions of one conference, optionally narrowed by equality filters.
pub async fn list_sessions(
    deps: &ServerDeps,
    websafe_conference_key: &str,
    filter: SessionFilterInput,
) -> ApiResult<Vec<SessionData>> {
    let conference_key = resolve_conference_key(websafe_conference_key)?;
    if deps.store.get_conference(&conference_key).await?.is_none() {
        return Err(conference_not_found(websafe_conference_key));
    }

    let filter = filter.into_filter()?;
    let sessions = deps
        .store
        .sessions_in_conference(&conference_key, &filter)
        .await?;
    Ok(sessions.into_iter().map(SessionData::from).collect())
}
