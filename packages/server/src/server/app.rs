use axum::routing::{get, post};
use axum::{middleware, Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::{conference, speaker};
use crate::kernel::jobs::{ChannelJobQueue, JobRegistry, JobRunner};
use crate::kernel::{DevIdentityProvider, MemoryCache, MemoryStore, ServerDeps};
use crate::server::middleware::identity::resolve_identity;
use crate::server::routes;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Register every domain's job handlers.
pub fn register_domain_jobs(registry: &mut JobRegistry, deps: &ServerDeps) {
    conference::announcements::register_jobs(registry, deps);
    speaker::featured::register_jobs(registry, deps);
}

/// Build the production dependency set and its job runner. The runner is
/// returned unstarted so the caller decides where it runs.
pub fn build_deps() -> (ServerDeps, JobRunner) {
    let (queue, rx) = ChannelJobQueue::new();
    let deps = ServerDeps {
        store: Arc::new(MemoryStore::new()),
        cache: Arc::new(MemoryCache::new()),
        jobs: Arc::new(queue),
        identity: Arc::new(DevIdentityProvider),
    };

    let mut registry = JobRegistry::new();
    register_domain_jobs(&mut registry, &deps);
    let runner = JobRunner::new(registry, rx);

    (deps, runner)
}

/// Assemble the router with all routes and middleware.
pub fn build_app(deps: ServerDeps) -> Router {
    let state = AppState { deps };

    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/profile",
            get(routes::profile::get_profile).post(routes::profile::save_profile),
        )
        .route("/conference", post(routes::conferences::create))
        .route(
            "/conference/:websafe_key",
            get(routes::conferences::get_one).put(routes::conferences::update),
        )
        .route(
            "/conference/:websafe_key/registration",
            post(routes::conferences::register).delete(routes::conferences::unregister),
        )
        .route("/conferences/created", get(routes::conferences::created))
        .route("/conferences/attending", get(routes::conferences::attending))
        .route("/conferences/query", post(routes::conferences::query))
        .route(
            "/conference/:websafe_key/sessions",
            get(routes::sessions::list).post(routes::sessions::create),
        )
        .route(
            "/conference/:websafe_key/wishlist",
            get(routes::sessions::wishlist_for_conference)
                .put(routes::sessions::wishlist_add)
                .delete(routes::sessions::wishlist_remove),
        )
        .route("/wishlist", get(routes::sessions::wishlist_all))
        .route(
            "/speakers",
            get(routes::speakers::get_all).post(routes::speakers::add),
        )
        .route(
            "/announcement",
            get(routes::announcements::get_announcement),
        )
        .route(
            "/featured-speaker",
            get(routes::announcements::get_featured_speaker),
        )
        .layer(middleware::from_fn(resolve_identity))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
