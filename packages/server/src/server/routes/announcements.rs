use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::common::errors::ApiResult;
use crate::domains::conference::announcements;
use crate::domains::speaker::featured;
use crate::server::app::AppState;

pub async fn get_announcement(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Value>> {
    let announcement = announcements::get_announcement(&state.deps).await?;
    Ok(Json(json!({ "announcement": announcement })))
}

/// `null` when nobody is currently featured.
pub async fn get_featured_speaker(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Value>> {
    let featured = featured::get_featured_speaker(&state.deps).await?;
    let value = serde_json::to_value(featured).map_err(anyhow::Error::from)?;
    Ok(Json(value))
}
