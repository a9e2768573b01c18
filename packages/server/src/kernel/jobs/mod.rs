// Background jobs: a queue seam, a handler registry keyed by job type and a
// runner task that drains the queue.

pub mod queue;
pub mod registry;
pub mod runner;
pub mod testing;

pub use queue::{enqueue, BaseJobQueue, ChannelJobQueue, JobCommand, QueuedJob};
pub use registry::{JobHandler, JobRegistry};
pub use runner::JobRunner;
pub use testing::SpyJobQueue;
