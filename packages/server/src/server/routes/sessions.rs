use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::common::errors::ApiResult;
use crate::domains::session::data::{
    CreateSessionInput, SessionData, SessionFilterInput, WishlistInput,
};
use crate::domains::session::{actions, wishlist};
use crate::server::app::AppState;
use crate::server::middleware::identity::{require_identity, AuthUser};

pub async fn list(
    Extension(state): Extension<AppState>,
    Path(websafe_key): Path<String>,
    Query(filter): Query<SessionFilterInput>,
) -> ApiResult<Json<Vec<SessionData>>> {
    let sessions = actions::list_sessions(&state.deps, &websafe_key, filter).await?;
    Ok(Json(sessions))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
    Json(input): Json<CreateSessionInput>,
) -> ApiResult<Json<SessionData>> {
    let identity = require_identity(&user)?;
    let session = actions::create_session(&state.deps, identity, &websafe_key, input).await?;
    Ok(Json(session))
}

pub async fn wishlist_for_conference(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
) -> ApiResult<Json<Vec<SessionData>>> {
    let identity = require_identity(&user)?;
    let sessions = wishlist::wishlist_for_conference(&state.deps, identity, &websafe_key).await?;
    Ok(Json(sessions))
}

pub async fn wishlist_add(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
    Json(input): Json<WishlistInput>,
) -> ApiResult<Json<SessionData>> {
    let identity = require_identity(&user)?;
    let session = wishlist::add_session_to_wishlist(
        &state.deps,
        identity,
        &websafe_key,
        input.session_name.as_deref(),
        input.speaker.as_deref(),
    )
    .await?;
    Ok(Json(session))
}

pub async fn wishlist_remove(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(websafe_key): Path<String>,
    Json(input): Json<WishlistInput>,
) -> ApiResult<Json<Value>> {
    let identity = require_identity(&user)?;
    let removed = wishlist::remove_session_from_wishlist(
        &state.deps,
        identity,
        &websafe_key,
        input.session_name.as_deref(),
        input.speaker.as_deref(),
    )
    .await?;
    Ok(Json(json!({ "removed": removed })))
}

pub async fn wishlist_all(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<SessionData>>> {
    let identity = require_identity(&user)?;
    let sessions = wishlist::wishlist_all(&state.deps, identity).await?;
    Ok(Json(sessions))
}
