//! Bearer-token identity resolution.
//!
//! The middleware resolves the Authorization header through the configured
//! identity provider and stashes the identity as a request extension. Routes
//! that need a caller use [`require_identity`]; public routes just ignore the
//! extension.

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

use crate::common::errors::{ApiError, ApiResult};
use crate::kernel::{Identity, ServerDeps};
use crate::server::app::AppState;

/// Identity of the caller, when the request carried a valid token.
#[derive(Clone)]
pub struct AuthUser(pub Option<Identity>);

pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn resolve_identity(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let identity = match bearer_token(header) {
        Some(token) => resolve(&state.deps, token).await,
        None => None,
    };

    request.extensions_mut().insert(AuthUser(identity));
    next.run(request).await
}

async fn resolve(deps: &ServerDeps, token: &str) -> Option<Identity> {
    match deps.identity.resolve(token).await {
        Ok(identity) => identity,
        Err(error) => {
            tracing::error!(%error, "identity provider failure");
            None
        }
    }
}

/// Unwrap the resolved identity or reject with 401.
pub fn require_identity(user: &AuthUser) -> ApiResult<&Identity> {
    user.0.as_ref().ok_or(ApiError::Unauthorized)
}
