use axum::extract::Path;
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::common::errors::ApiResult;
use crate::domains::conference::data::{
    ConferenceData, ConferenceQueryInput, CreateConferenceInput, UpdateConferenceInput,
};
use crate::domains::conference::{actions, registration};
use crate::server::app::AppState;
use crate::server::middleware::identity::{require_identity, AuthUser};

pub async fn create(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateConferenceInput>,
) -> ApiResult<Json<ConferenceData>> {
    let identity = require_identity(&user)?;
    let conference = actions::create_conference(&state.deps, identity, input).await?;
    Ok(Json(conference))
}

pub async fn get_one(
    Extension(state): Extension<AppState>,
    Path(websafe_key): Path<String>,
) -> ApiResult<Json<ConferenceData>> {
    let conference = actions::get_conference(&state.deps, &websafe_key).await?;
    Ok(Json(conference))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
    Json(input): Json<UpdateConferenceInput>,
) -> ApiResult<Json<ConferenceData>> {
    let identity = require_identity(&user)?;
    let conference =
        actions::update_conference(&state.deps, identity, &websafe_key, input).await?;
    Ok(Json(conference))
}

pub async fn register(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
) -> ApiResult<Json<Value>> {
    let identity = require_identity(&user)?;
    let registered =
        registration::register_for_conference(&state.deps, identity, &websafe_key).await?;
    Ok(Json(json!({ "registered": registered })))
}

pub async fn unregister(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
) -> ApiResult<Json<Value>> {
    let identity = require_identity(&user)?;
    let unregistered =
        registration::unregister_from_conference(&state.deps, identity, &websafe_key).await?;
    Ok(Json(json!({ "unregistered": unregistered })))
}

pub async fn created(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<ConferenceData>>> {
    let identity = require_identity(&user)?;
    let conferences = actions::conferences_created(&state.deps, identity).await?;
    Ok(Json(conferences))
}

pub async fn attending(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<ConferenceData>>> {
    let identity = require_identity(&user)?;
    let conferences = actions::conferences_to_attend(&state.deps, identity).await?;
    Ok(Json(conferences))
}

pub async fn query(
    Extension(state): Extension<AppState>,
    Json(input): Json<ConferenceQueryInput>,
) -> ApiResult<Json<Vec<ConferenceData>>> {
    let conferences = actions::query_conferences(&state.deps, &input.filters).await?;
    Ok(Json(conferences))
}
