//! Cron-driven background work.
//!
//! The scheduler only enqueues job commands; the actual work runs on the job
//! runner so scheduled and ad-hoc refreshes share one code path.

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::conference::announcements::RefreshAnnouncement;
use crate::kernel::jobs::enqueue;
use crate::kernel::ServerDeps;

/// Start the cron scheduler. The returned handle keeps it alive; dropping it
/// stops the schedule.
pub async fn start_scheduler(
    deps: ServerDeps,
    announcement_cron: &str,
) -> anyhow::Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(announcement_cron, move |_id, _scheduler| {
        let deps = deps.clone();
        Box::pin(async move {
            if let Err(error) = enqueue(deps.jobs.as_ref(), &RefreshAnnouncement::default()).await
            {
                tracing::error!(%error, "failed to queue announcement refresh");
            }
        })
    })?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(cron = announcement_cron, "announcement refresh scheduled");
    Ok(scheduler)
}
