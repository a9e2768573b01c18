//! Attendee session wishlists.
//!
//! A wishlist entry is a session key stored on the attendee's profile.
//! Sessions are addressed by name within one conference; when several
//! sessions share the name, the oldest one wins.

use crate::common::errors::{ApiError, ApiResult};
use crate::common::keys::ConferenceKey;
use crate::domains::session::data::SessionData;
use crate::domains::session::models::Session;
use crate::kernel::{Identity, ServerDeps};

fn conference_not_found(websafe_key: &str) -> ApiError {
    ApiError::NotFound(format!("No conference found with key: {websafe_key}"))
}

fn resolve_conference_key(websafe_key: &str) -> ApiResult<ConferenceKey> {
    ConferenceKey::from_websafe(websafe_key).map_err(|_| conference_not_found(websafe_key))
}

fn required_name(session_name: Option<&str>) -> ApiResult<&str> {
    match session_name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ApiError::Forbidden(
            "You must provide a 'sessionName' for the query.".to_string(),
        )),
    }
}

async fn find_named_session(
    deps: &ServerDeps,
    conference: &ConferenceKey,
    name: &str,
    speaker: Option<&str>,
) -> ApiResult<Session> {
    let matches = deps.store.find_sessions_by_name(conference, name).await?;
    // Session ids are time-ordered, so the minimum id is the oldest session.
    matches
        .into_iter()
        .filter(|s| match speaker {
            Some(speaker) => s.speaker.as_deref() == Some(speaker),
            None => true,
        })
        .min_by_key(|s| s.key.id)
        .ok_or_else(|| ApiError::NotFound("No sessions found to add to wishlist".to_string()))
}

/// Add a session (by name) to the caller's wishlist. Registration for the
/// conference is a precondition.
pub async fn add_session_to_wishlist(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_conference_key: &str,
    session_name: Option<&str>,
    speaker: Option<&str>,
) -> ApiResult<SessionData> {
    let conference_key = resolve_conference_key(websafe_conference_key)?;
    if deps.store.get_conference(&conference_key).await?.is_none() {
        return Err(conference_not_found(websafe_conference_key));
    }

    let mut profile = deps
        .store
        .get_profile(&identity.user_id)
        .await?
        .filter(|p| p.is_attending(&conference_key))
        .ok_or_else(|| {
            ApiError::Forbidden(
                "You must register to the conference in order to add sessions to wishlist."
                    .to_string(),
            )
        })?;

    let name = required_name(session_name)?;
    let session = find_named_session(deps, &conference_key, name, speaker).await?;

    if profile.has_wishlisted(&session.key) {
        return Err(ApiError::Conflict(
            "You already have this session in your wishlist".to_string(),
        ));
    }

    profile.session_wishlist.push(session.key.clone());
    deps.store.put_profile(&profile).await?;

    tracing::debug!(
        session = %session.key.websafe(),
        attendee = %identity.user_id,
        "session wishlisted"
    );
    Ok(SessionData::from(session))
}

/// Remove a session (by name) from the caller's wishlist. Registration for
/// the conference is a precondition, same as adding. Returns `false` when
/// the session was not on the wishlist.
pub async fn remove_session_from_wishlist(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_conference_key: &str,
    session_name: Option<&str>,
    speaker: Option<&str>,
) -> ApiResult<bool> {
    let conference_key = resolve_conference_key(websafe_conference_key)?;
    if deps.store.get_conference(&conference_key).await?.is_none() {
        return Err(conference_not_found(websafe_conference_key));
    }

    let mut profile = deps
        .store
        .get_profile(&identity.user_id)
        .await?
        .filter(|p| p.is_attending(&conference_key))
        .ok_or_else(|| {
            ApiError::Forbidden(
                "You must register to the conference in order to add sessions to wishlist."
                    .to_string(),
            )
        })?;

    let name = required_name(session_name)?;
    let session = find_named_session(deps, &conference_key, name, speaker).await?;

    if !profile.has_wishlisted(&session.key) {
        return Ok(false);
    }

    profile.session_wishlist.retain(|key| key != &session.key);
    deps.store.put_profile(&profile).await?;
    Ok(true)
}

/// The caller's wishlisted sessions within one conference, in the order they
/// were added.
pub async fn wishlist_for_conference(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_conference_key: &str,
) -> ApiResult<Vec<SessionData>> {
    let conference_key = resolve_conference_key(websafe_conference_key)?;
    let sessions = wishlist_sessions(deps, identity).await?;
    Ok(sessions
        .into_iter()
        .filter(|s| s.key.conference == conference_key)
        .map(SessionData::from)
        .collect())
}

/// The caller's whole wishlist across all conferences.
pub async fn wishlist_all(
    deps: &ServerDeps,
    identity: &Identity,
) -> ApiResult<Vec<SessionData>> {
    let sessions = wishlist_sessions(deps, identity).await?;
    Ok(sessions.into_iter().map(SessionData::from).collect())
}

async fn wishlist_sessions(deps: &ServerDeps, identity: &Identity) -> ApiResult<Vec<Session>> {
    let profile = match deps.store.get_profile(&identity.user_id).await? {
        Some(profile) => profile,
        None => return Ok(Vec::new()),
    };

    let mut sessions = Vec::with_capacity(profile.session_wishlist.len());
    for key in &profile.session_wishlist {
        match deps.store.get_session(key).await? {
            Some(session) => sessions.push(session),
            None => {
                tracing::warn!(session = %key.websafe(), "wishlisted session no longer exists")
            }
        }
    }
    Ok(sessions)
}
