//! Conference registration engine.
//!
//! Registration touches two records at once, the attendee's profile and the
//! conference's seat count, so both mutations run inside a single store
//! transaction and either land together or not at all.

use crate::common::errors::{ApiError, ApiResult};
use crate::common::keys::ConferenceKey;
use crate::domains::profile::models::Profile;
use crate::kernel::{Identity, ServerDeps};

fn conference_not_found(websafe_key: &str) -> ApiError {
    ApiError::NotFound(format!("No conference found with key: {websafe_key}"))
}

fn resolve_key(websafe_key: &str) -> ApiResult<ConferenceKey> {
    ConferenceKey::from_websafe(websafe_key).map_err(|_| conference_not_found(websafe_key))
}

/// Register the caller for a conference. Returns `true` on success; every
/// failed precondition surfaces as an error, checked in a fixed order so
/// clients see a stable message for each state.
pub async fn register_for_conference(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_key: &str,
) -> ApiResult<bool> {
    let key = resolve_key(websafe_key)?;

    let mut tx = deps.store.begin().await?;

    let mut conference = tx
        .get_conference(&key)
        .await?
        .ok_or_else(|| conference_not_found(websafe_key))?;
    let mut profile = match tx.get_profile(&identity.user_id).await? {
        Some(profile) => profile,
        None => Profile::new(identity),
    };

    if profile.is_attending(&key) {
        return Err(ApiError::Conflict(
            "You have already registered for this conference".to_string(),
        ));
    }
    if conference.seats_available <= 0 {
        return Err(ApiError::Conflict(
            "There are no seats available.".to_string(),
        ));
    }

    profile.conferences_to_attend.push(key.clone());
    conference.seats_available -= 1;

    tx.put_profile(&profile).await?;
    tx.put_conference(&conference).await?;
    tx.commit().await?;

    tracing::info!(
        conference = %key.websafe(),
        attendee = %identity.user_id,
        seats_left = conference.seats_available,
        "registration confirmed"
    );
    Ok(true)
}

/// Drop the caller's registration. Returns `false` (not an error) when they
/// were never registered; the seat count only moves when a registration is
/// actually removed.
pub async fn unregister_from_conference(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_key: &str,
) -> ApiResult<bool> {
    let key = resolve_key(websafe_key)?;

    let mut tx = deps.store.begin().await?;

    let mut conference = tx
        .get_conference(&key)
        .await?
        .ok_or_else(|| conference_not_found(websafe_key))?;
    let mut profile = match tx.get_profile(&identity.user_id).await? {
        Some(profile) => profile,
        None => return Ok(false),
    };

    if !profile.is_attending(&key) {
        return Ok(false);
    }

    profile.conferences_to_attend.retain(|k| k != &key);
    conference.seats_available += 1;

    tx.put_profile(&profile).await?;
    tx.put_conference(&conference).await?;
    tx.commit().await?;

    tracing::info!(
        conference = %key.websafe(),
        attendee = %identity.user_id,
        "registration cancelled"
    );
    Ok(true)
}
