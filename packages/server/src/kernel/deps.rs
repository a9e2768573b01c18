use std::sync::Arc;

use crate::kernel::jobs::BaseJobQueue;
use crate::kernel::store::BaseEntityStore;
use crate::kernel::traits::{BaseCacheService, BaseIdentityProvider};

/// Shared dependency container handed to every action and job handler.
/// Cloning is cheap; all members are behind `Arc`.
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseEntityStore>,
    pub cache: Arc<dyn BaseCacheService>,
    pub jobs: Arc<dyn BaseJobQueue>,
    pub identity: Arc<dyn BaseIdentityProvider>,
}
