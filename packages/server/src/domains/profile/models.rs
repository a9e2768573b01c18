use serde::{Deserialize, Serialize};

use crate::common::keys::{ConferenceKey, SessionKey, UserId};
use crate::kernel::Identity;

/// T-shirt size. Stored as a closed enumeration; unknown strings are rejected
/// at the boundary instead of being persisted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeeShirtSize {
    #[default]
    NotSpecified,
    XsM,
    XsW,
    SM,
    SW,
    MM,
    MW,
    LM,
    LW,
    XlM,
    XlW,
    XxlM,
    XxlW,
    XxxlM,
    XxxlW,
}

impl TeeShirtSize {
    /// Parse the wire form (e.g. `XL_W`), returning `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
    }
}

/// User profile record.
///
/// Created lazily on first authenticated access and never deleted. The
/// attended-conference and wishlist lists keep insertion order; duplicates are
/// prevented by the registration and wishlist engines rather than the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    pub conferences_to_attend: Vec<ConferenceKey>,
    pub session_wishlist: Vec<SessionKey>,
}

impl Profile {
    /// Fresh profile for a first-time authenticated user.
    pub fn new(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id.clone(),
            display_name: identity.display_name.clone(),
            main_email: identity.email.clone(),
            tee_shirt_size: TeeShirtSize::default(),
            conferences_to_attend: Vec::new(),
            session_wishlist: Vec::new(),
        }
    }

    pub fn is_attending(&self, conference: &ConferenceKey) -> bool {
        self.conferences_to_attend.contains(conference)
    }

    pub fn has_wishlisted(&self, session: &SessionKey) -> bool {
        self.session_wishlist.contains(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_shirt_size_parses_known_values_only() {
        assert_eq!(TeeShirtSize::parse("NOT_SPECIFIED"), Some(TeeShirtSize::NotSpecified));
        assert_eq!(TeeShirtSize::parse("XL_W"), Some(TeeShirtSize::XlW));
        assert_eq!(TeeShirtSize::parse("GIGANTIC"), None);
    }

    #[test]
    fn new_profile_defaults_to_not_specified() {
        let identity = Identity {
            user_id: UserId::new("u@example.com"),
            email: "u@example.com".to_string(),
            display_name: "u".to_string(),
        };
        let profile = Profile::new(&identity);
        assert_eq!(profile.tee_shirt_size, TeeShirtSize::NotSpecified);
        assert!(profile.conferences_to_attend.is_empty());
        assert!(profile.session_wishlist.is_empty());
    }
}
