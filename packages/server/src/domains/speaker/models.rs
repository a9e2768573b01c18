use serde::{Deserialize, Serialize};

use crate::common::keys::SessionKey;

/// Speaker roster entry, keyed by the speaker's name. Grows one session key
/// at a time as the linker runs; the linker guarantees no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub session_keys: Vec<SessionKey>,
}

impl Speaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            session_keys: Vec::new(),
        }
    }
}
