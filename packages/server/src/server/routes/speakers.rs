use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::common::errors::ApiResult;
use crate::domains::session::actions as session_actions;
use crate::domains::session::data::AddSpeakerInput;
use crate::domains::speaker::actions::{self, SpeakerData};
use crate::server::app::AppState;
use crate::server::middleware::identity::{require_identity, AuthUser};

pub async fn get_all(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<SpeakerData>>> {
    let speakers = actions::get_all_speakers(&state.deps).await?;
    Ok(Json(speakers))
}

pub async fn add(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<AddSpeakerInput>,
) -> ApiResult<Json<Value>> {
    require_identity(&user)?;
    session_actions::add_speaker(&state.deps, &input.name, &input.websafe_session_key).await?;
    Ok(Json(json!({ "added": true })))
}
