use tokio::sync::mpsc;

use crate::kernel::jobs::queue::QueuedJob;
use crate::kernel::jobs::registry::JobRegistry;

/// Drains the queue and dispatches each job to its registered handler.
/// Handler failures are logged and swallowed so one bad job never stops the
/// loop.
pub struct JobRunner {
    registry: JobRegistry,
    rx: mpsc::UnboundedReceiver<QueuedJob>,
}

impl JobRunner {
    pub fn new(registry: JobRegistry, rx: mpsc::UnboundedReceiver<QueuedJob>) -> Self {
        Self { registry, rx }
    }

    /// Run until every queue sender is gone.
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            self.dispatch(job).await;
        }
        tracing::info!("job queue closed, runner stopping");
    }

    async fn dispatch(&self, job: QueuedJob) {
        let Some(handler) = self.registry.get(&job.job_type) else {
            tracing::error!(job_type = %job.job_type, job_id = %job.id, "no handler for job");
            return;
        };

        tracing::debug!(job_type = %job.job_type, job_id = %job.id, "job started");
        match handler.execute(job.params).await {
            Ok(()) => {
                tracing::debug!(job_type = %job.job_type, job_id = %job.id, "job finished")
            }
            Err(error) => {
                tracing::error!(job_type = %job.job_type, job_id = %job.id, %error, "job failed")
            }
        }
    }
}
