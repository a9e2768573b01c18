//! Ready-made dependency set for tests.
//!
//! Holds the concrete fakes so tests can reach past the trait objects (to
//! inspect spied jobs, for example) while handing actions a plain
//! [`ServerDeps`].

use std::sync::Arc;

use crate::common::keys::UserId;
use crate::kernel::cache::MemoryCache;
use crate::kernel::deps::ServerDeps;
use crate::kernel::jobs::SpyJobQueue;
use crate::kernel::memory_store::MemoryStore;
use crate::kernel::traits::{DevIdentityProvider, Identity};

pub struct TestDependencies {
    pub store: MemoryStore,
    pub cache: MemoryCache,
    pub jobs: SpyJobQueue,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            cache: MemoryCache::new(),
            jobs: SpyJobQueue::new(),
        }
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps {
            store: Arc::new(self.store.clone()),
            cache: Arc::new(self.cache.clone()),
            jobs: Arc::new(self.jobs.clone()),
            identity: Arc::new(DevIdentityProvider),
        }
    }
}

/// Identity for a test user; the email doubles as the user id, matching the
/// development identity provider.
pub fn identity(email: &str) -> Identity {
    Identity {
        user_id: UserId::new(email),
        email: email.to_string(),
        display_name: email.split('@').next().unwrap_or(email).to_string(),
    }
}
