//! Typed entity keys with websafe encoding.
//!
//! Ownership is hierarchical: a `ConferenceKey` carries its organizer's
//! `UserId` and a `SessionKey` carries its full `ConferenceKey`, so every key
//! names its ancestor path explicitly. The websafe form is URL-safe base64 of
//! the serialized path and is the only representation clients ever see.

use std::fmt;
use std::sync::{Mutex, OnceLock};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::timestamp::context::ContextV7;
use uuid::{Timestamp, Uuid};

/// V7 UUID from a shared counter context, so ids allocated by this process
/// sort in allocation order even within one millisecond. The context keeps
/// interior state that is not `Sync`, hence the mutex.
fn next_id() -> Uuid {
    static CONTEXT: OnceLock<Mutex<ContextV7>> = OnceLock::new();
    let context = CONTEXT
        .get_or_init(|| Mutex::new(ContextV7::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Uuid::new_v7(Timestamp::now(&*context))
}

/// Opaque user identity as handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("malformed websafe key")]
    Malformed,
}

// Kind tags baked into the encoded form so a session key can never decode as
// a conference key.
const CONFERENCE_KIND: &str = "Conference";
const SESSION_KIND: &str = "Session";

fn encode<T: Serialize>(value: &T) -> String {
    // Serialization of plain tuples of strings/uuids cannot fail.
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(bytes)
}

fn decode<T: for<'de> Deserialize<'de>>(websafe: &str) -> Result<T, KeyError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(websafe.as_bytes())
        .map_err(|_| KeyError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| KeyError::Malformed)
}

/// Key of a Conference, scoped under its organizer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConferenceKey {
    pub organizer: UserId,
    pub id: Uuid,
}

impl ConferenceKey {
    /// Allocate a fresh conference id under the given organizer.
    ///
    /// Ids are time-ordered, so allocation order is creation order.
    pub fn allocate(organizer: UserId) -> Self {
        Self {
            organizer,
            id: next_id(),
        }
    }

    pub fn websafe(&self) -> String {
        encode(&(CONFERENCE_KIND, self.organizer.as_str(), self.id))
    }

    pub fn from_websafe(websafe: &str) -> Result<Self, KeyError> {
        let (kind, organizer, id): (String, String, Uuid) = decode(websafe)?;
        if kind != CONFERENCE_KIND {
            return Err(KeyError::Malformed);
        }
        Ok(Self {
            organizer: UserId::new(organizer),
            id,
        })
    }
}

/// Key of a Session, scoped under its conference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub conference: ConferenceKey,
    pub id: Uuid,
}

impl SessionKey {
    /// Allocate a fresh session id under the given conference.
    pub fn allocate(conference: ConferenceKey) -> Self {
        Self {
            conference,
            id: next_id(),
        }
    }

    pub fn websafe(&self) -> String {
        encode(&(
            SESSION_KIND,
            self.conference.organizer.as_str(),
            self.conference.id,
            self.id,
        ))
    }

    pub fn from_websafe(websafe: &str) -> Result<Self, KeyError> {
        let (kind, organizer, conference_id, id): (String, String, Uuid, Uuid) = decode(websafe)?;
        if kind != SESSION_KIND {
            return Err(KeyError::Malformed);
        }
        Ok(Self {
            conference: ConferenceKey {
                organizer: UserId::new(organizer),
                id: conference_id,
            },
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_key_roundtrips_through_websafe_form() {
        let key = ConferenceKey::allocate(UserId::new("organizer@example.com"));
        let websafe = key.websafe();
        let decoded = ConferenceKey::from_websafe(&websafe).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn session_key_roundtrips_through_websafe_form() {
        let conference = ConferenceKey::allocate(UserId::new("organizer@example.com"));
        let key = SessionKey::allocate(conference);
        let decoded = SessionKey::from_websafe(&key.websafe()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(ConferenceKey::from_websafe("not-a-key").is_err());
        assert!(SessionKey::from_websafe("####").is_err());
    }

    #[test]
    fn kinds_do_not_cross_decode() {
        let conference = ConferenceKey::allocate(UserId::new("o@example.com"));
        let session = SessionKey::allocate(conference.clone());

        assert!(SessionKey::from_websafe(&conference.websafe()).is_err());
        assert!(ConferenceKey::from_websafe(&session.websafe()).is_err());
    }

    #[test]
    fn ids_sort_in_allocation_order() {
        let first = ConferenceKey::allocate(UserId::new("o@example.com"));
        let second = ConferenceKey::allocate(UserId::new("o@example.com"));
        assert!(first.id < second.id);
    }

    #[test]
    fn ids_allocate_from_any_thread() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| ConferenceKey::allocate(UserId::new("o@example.com")).id)
            })
            .collect();
        let mut ids: Vec<Uuid> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn websafe_form_is_url_safe() {
        let key = ConferenceKey::allocate(UserId::new("a+b/c@example.com"));
        let websafe = key.websafe();
        assert!(websafe
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
