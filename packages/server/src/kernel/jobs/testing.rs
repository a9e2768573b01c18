use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::kernel::jobs::queue::{BaseJobQueue, QueuedJob};

/// Test double that records every submitted job instead of running it.
#[derive(Clone, Default)]
pub struct SpyJobQueue {
    submitted: Arc<Mutex<Vec<QueuedJob>>>,
}

impl SpyJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<QueuedJob> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn was_submitted(&self, job_type: &str) -> bool {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .any(|job| job.job_type == job_type)
    }
}

#[async_trait]
impl BaseJobQueue for SpyJobQueue {
    async fn submit(&self, job_type: &str, params: serde_json::Value) -> anyhow::Result<Uuid> {
        let job = QueuedJob {
            id: Uuid::now_v7(),
            job_type: job_type.to_string(),
            params,
        };
        let id = job.id;
        self.submitted.lock().unwrap().push(job);
        Ok(id)
    }
}
