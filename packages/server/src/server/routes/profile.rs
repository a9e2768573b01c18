use axum::{Extension, Json};

use crate::common::errors::ApiResult;
use crate::domains::profile::actions;
use crate::domains::profile::data::{ProfileData, ProfileUpdateInput};
use crate::server::app::AppState;
use crate::server::middleware::identity::{require_identity, AuthUser};

pub async fn get_profile(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<ProfileData>> {
    let identity = require_identity(&user)?;
    let profile = actions::get_or_create_profile(&state.deps, identity).await?;
    Ok(Json(profile.into()))
}

pub async fn save_profile(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ProfileUpdateInput>,
) -> ApiResult<Json<ProfileData>> {
    let identity = require_identity(&user)?;
    let profile = actions::save_profile(&state.deps, identity, input).await?;
    Ok(Json(profile.into()))
}
