//! Nearly-sold-out announcement cache.
//!
//! A scheduled job rebuilds the announcement from conferences with five or
//! fewer seats left. Reads never touch the store, only the cache.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::errors::ApiResult;
use crate::kernel::jobs::{JobCommand, JobHandler, JobRegistry};
use crate::kernel::ServerDeps;

pub const ANNOUNCEMENTS_CACHE_KEY: &str = "RECENT_ANNOUNCEMENTS";

/// Command dispatched by the scheduler (and available to operators) to
/// rebuild the announcement cache entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshAnnouncement {}

impl JobCommand for RefreshAnnouncement {
    const JOB_TYPE: &'static str = "refresh_announcement";
}

/// Recompute the announcement and return the new value. Writes the cache
/// entry when any conference qualifies, deletes it otherwise so stale text
/// never lingers.
pub async fn refresh_announcement(deps: &ServerDeps) -> ApiResult<String> {
    let nearly_sold_out = deps.store.conferences_with_low_seats(5).await?;

    let announcement = if nearly_sold_out.is_empty() {
        deps.cache.delete(ANNOUNCEMENTS_CACHE_KEY).await?;
        String::new()
    } else {
        let names: Vec<&str> = nearly_sold_out.iter().map(|c| c.name.as_str()).collect();
        let text = format!(
            "Last chance to attend! The following conferences are nearly sold out: {}",
            names.join(", ")
        );
        deps.cache
            .set(ANNOUNCEMENTS_CACHE_KEY, serde_json::Value::String(text.clone()))
            .await?;
        text
    };

    tracing::info!(
        conferences = nearly_sold_out.len(),
        "announcement cache refreshed"
    );
    Ok(announcement)
}

/// Read the current announcement from the cache. Empty string when no
/// announcement is set.
pub async fn get_announcement(deps: &ServerDeps) -> ApiResult<String> {
    let cached = deps.cache.get(ANNOUNCEMENTS_CACHE_KEY).await?;
    Ok(cached
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default())
}

struct RefreshAnnouncementHandler {
    deps: ServerDeps,
}

#[async_trait]
impl JobHandler for RefreshAnnouncementHandler {
    async fn execute(&self, _params: serde_json::Value) -> anyhow::Result<()> {
        refresh_announcement(&self.deps).await?;
        Ok(())
    }
}

pub fn register_jobs(registry: &mut JobRegistry, deps: &ServerDeps) {
    registry.register::<RefreshAnnouncement>(RefreshAnnouncementHandler { deps: deps.clone() });
}
