use std::collections::HashMap;

use crate::common::errors::{ApiError, ApiResult};
use crate::common::keys::{ConferenceKey, UserId};
use crate::domains::conference::data::{
    ConferenceData, ConferenceFilterInput, CreateConferenceInput, UpdateConferenceInput,
};
use crate::domains::conference::models::{
    parse_date, Conference, DEFAULT_CITY, DEFAULT_TOPICS,
};
use crate::domains::conference::query::build_query;
use crate::domains::profile::actions::get_or_create_profile;
use crate::kernel::{Identity, ServerDeps};

fn conference_not_found(websafe_key: &str) -> ApiError {
    ApiError::NotFound(format!("No conference found with key: {websafe_key}"))
}

fn resolve_key(websafe_key: &str) -> ApiResult<ConferenceKey> {
    ConferenceKey::from_websafe(websafe_key).map_err(|_| conference_not_found(websafe_key))
}

/// Create a new conference owned by the caller.
pub async fn create_conference(
    deps: &ServerDeps,
    identity: &Identity,
    input: CreateConferenceInput,
) -> ApiResult<ConferenceData> {
    let name = match input.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            return Err(ApiError::BadRequest(
                "Conference 'name' field required".to_string(),
            ))
        }
    };

    // The organizer's profile backs the conference's ancestor key; make sure
    // it exists before hanging children off it.
    let profile = get_or_create_profile(deps, identity).await?;

    let start_date = input.start_date.as_deref().map(parse_date).transpose()?;
    let end_date = input.end_date.as_deref().map(parse_date).transpose()?;
    let max_attendees = input.max_attendees.unwrap_or(0).max(0);

    let mut conference = Conference {
        key: ConferenceKey::allocate(identity.user_id.clone()),
        name,
        description: input.description,
        topics: match input.topics {
            Some(topics) if !topics.is_empty() => topics,
            _ => DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        },
        city: match input.city {
            Some(city) if !city.trim().is_empty() => city,
            _ => DEFAULT_CITY.to_string(),
        },
        start_date,
        end_date,
        month: 0,
        max_attendees,
        // Nobody is registered yet, so every seat is open.
        seats_available: max_attendees,
    };
    conference.sync_month();

    deps.store.put_conference(&conference).await?;
    tracing::info!(
        conference = %conference.key.websafe(),
        organizer = %identity.user_id,
        "conference created"
    );

    Ok(ConferenceData::from_model(
        conference,
        Some(profile.display_name),
    ))
}

/// Update a conference. Only the organizer may update; runs in a store
/// transaction so concurrent registrations never observe a half-applied edit.
pub async fn update_conference(
    deps: &ServerDeps,
    identity: &Identity,
    websafe_key: &str,
    input: UpdateConferenceInput,
) -> ApiResult<ConferenceData> {
    let key = resolve_key(websafe_key)?;

    let mut tx = deps.store.begin().await?;
    let mut conference = tx
        .get_conference(&key)
        .await?
        .ok_or_else(|| conference_not_found(websafe_key))?;

    if conference.key.organizer != identity.user_id {
        return Err(ApiError::Forbidden(
            "Only the owner can update the conference.".to_string(),
        ));
    }

    if let Some(name) = input.name {
        if !name.trim().is_empty() {
            conference.name = name;
        }
    }
    if let Some(description) = input.description {
        conference.description = Some(description);
    }
    if let Some(topics) = input.topics {
        if !topics.is_empty() {
            conference.topics = topics;
        }
    }
    if let Some(city) = input.city {
        if !city.trim().is_empty() {
            conference.city = city;
        }
    }
    if let Some(start_date) = input.start_date.as_deref() {
        conference.start_date = Some(parse_date(start_date)?);
        conference.sync_month();
    }
    if let Some(end_date) = input.end_date.as_deref() {
        conference.end_date = Some(parse_date(end_date)?);
    }
    if let Some(max_attendees) = input.max_attendees {
        // Shrinking capacity clamps remaining seats so seats never exceed it.
        conference.max_attendees = max_attendees.max(0);
        conference.seats_available = conference.seats_available.min(conference.max_attendees);
    }

    tx.put_conference(&conference).await?;
    tx.commit().await?;

    let display_name = deps
        .store
        .get_profile(&identity.user_id)
        .await?
        .map(|p| p.display_name);
    Ok(ConferenceData::from_model(conference, display_name))
}

/// Return one conference by websafe key, with its organizer's display name.
pub async fn get_conference(deps: &ServerDeps, websafe_key: &str) -> ApiResult<ConferenceData> {
    let key = resolve_key(websafe_key)?;
    let conference = deps
        .store
        .get_conference(&key)
        .await?
        .ok_or_else(|| conference_not_found(websafe_key))?;

    let display_name = deps
        .store
        .get_profile(&conference.key.organizer)
        .await?
        .map(|p| p.display_name);
    Ok(ConferenceData::from_model(conference, display_name))
}

/// Conferences created by the caller (ancestor query on their profile).
pub async fn conferences_created(
    deps: &ServerDeps,
    identity: &Identity,
) -> ApiResult<Vec<ConferenceData>> {
    let profile = get_or_create_profile(deps, identity).await?;
    let conferences = deps
        .store
        .conferences_by_organizer(&identity.user_id)
        .await?;

    Ok(conferences
        .into_iter()
        .map(|conf| ConferenceData::from_model(conf, Some(profile.display_name.clone())))
        .collect())
}

/// Conferences the caller has registered for, in registration order.
pub async fn conferences_to_attend(
    deps: &ServerDeps,
    identity: &Identity,
) -> ApiResult<Vec<ConferenceData>> {
    let profile = get_or_create_profile(deps, identity).await?;

    let mut conferences = Vec::with_capacity(profile.conferences_to_attend.len());
    for key in &profile.conferences_to_attend {
        match deps.store.get_conference(key).await? {
            Some(conference) => conferences.push(conference),
            None => {
                tracing::warn!(conference = %key.websafe(), "attended conference no longer exists")
            }
        }
    }

    with_organizer_names(deps, conferences).await
}

/// Run a formatted filter query over all conferences.
pub async fn query_conferences(
    deps: &ServerDeps,
    filters: &[ConferenceFilterInput],
) -> ApiResult<Vec<ConferenceData>> {
    let query = build_query(filters)?;
    let conferences = deps.store.query_conferences(&query).await?;
    with_organizer_names(deps, conferences).await
}

async fn with_organizer_names(
    deps: &ServerDeps,
    conferences: Vec<Conference>,
) -> ApiResult<Vec<ConferenceData>> {
    let mut names: HashMap<UserId, Option<String>> = HashMap::new();
    let mut items = Vec::with_capacity(conferences.len());

    for conference in conferences {
        let organizer = conference.key.organizer.clone();
        let display_name = match names.get(&organizer) {
            Some(cached) => cached.clone(),
            None => {
                let name = deps
                    .store
                    .get_profile(&organizer)
                    .await?
                    .map(|p| p.display_name);
                names.insert(organizer, name.clone());
                name
            }
        };
        items.push(ConferenceData::from_model(conference, display_name));
    }

    Ok(items)
}
