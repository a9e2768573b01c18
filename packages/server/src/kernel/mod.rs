// Kernel: collaborator seams (identity, store, cache, job queue), their
// in-process implementations and the background job machinery.

pub mod cache;
pub mod deps;
pub mod jobs;
pub mod memory_store;
pub mod scheduled_tasks;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use cache::MemoryCache;
pub use deps::ServerDeps;
pub use memory_store::MemoryStore;
pub use store::{BaseEntityStore, LinkOutcome, StoreTransaction};
pub use traits::{BaseCacheService, BaseIdentityProvider, DevIdentityProvider, Identity};
