use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::jobs::queue::JobCommand;

/// Executes one kind of job. Handlers own their dependencies.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn execute(&self, params: serde_json::Value) -> anyhow::Result<()>;
}

/// Routes a job type tag to its handler.
#[derive(Default)]
pub struct JobRegistry {
    handlers: HashMap<&'static str, Arc<dyn JobHandler>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: JobCommand>(&mut self, handler: impl JobHandler + 'static) {
        self.handlers.insert(C::JOB_TYPE, Arc::new(handler));
    }

    pub fn get(&self, job_type: &str) -> Option<Arc<dyn JobHandler>> {
        self.handlers.get(job_type).cloned()
    }
}
