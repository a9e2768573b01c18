use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A job as it travels through the queue: a type tag plus JSON parameters.
#[derive(Debug, Clone)]
pub struct QueuedJob {
    pub id: Uuid,
    pub job_type: String,
    pub params: serde_json::Value,
}

/// Queue seam. Object safe on purpose; typed submission goes through
/// [`enqueue`].
#[async_trait]
pub trait BaseJobQueue: Send + Sync {
    async fn submit(&self, job_type: &str, params: serde_json::Value) -> anyhow::Result<Uuid>;
}

/// A typed job command. The type tag routes the command to its handler.
pub trait JobCommand: Serialize {
    const JOB_TYPE: &'static str;
}

/// Serialize a command and submit it under its type tag.
pub async fn enqueue<C: JobCommand + Sync>(
    queue: &dyn BaseJobQueue,
    command: &C,
) -> anyhow::Result<Uuid> {
    let params = serde_json::to_value(command)?;
    queue.submit(C::JOB_TYPE, params).await
}

/// In-process queue over an unbounded channel; the receiving half feeds the
/// runner.
pub struct ChannelJobQueue {
    tx: mpsc::UnboundedSender<QueuedJob>,
}

impl ChannelJobQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<QueuedJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl BaseJobQueue for ChannelJobQueue {
    async fn submit(&self, job_type: &str, params: serde_json::Value) -> anyhow::Result<Uuid> {
        let job = QueuedJob {
            id: Uuid::now_v7(),
            job_type: job_type.to_string(),
            params,
        };
        let id = job.id;
        self.tx
            .send(job)
            .map_err(|_| anyhow::anyhow!("job queue closed"))?;
        tracing::debug!(job_type, job_id = %id, "job queued");
        Ok(id)
    }
}
