use serde::{Deserialize, Serialize};

use crate::domains::profile::models::{Profile, TeeShirtSize};

/// Profile payload returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    pub conference_keys_to_attend: Vec<String>,
    pub session_wishlist: Vec<String>,
}

impl From<Profile> for ProfileData {
    fn from(profile: Profile) -> Self {
        Self {
            display_name: profile.display_name,
            main_email: profile.main_email,
            tee_shirt_size: profile.tee_shirt_size,
            conference_keys_to_attend: profile
                .conferences_to_attend
                .iter()
                .map(|key| key.websafe())
                .collect(),
            session_wishlist: profile
                .session_wishlist
                .iter()
                .map(|key| key.websafe())
                .collect(),
        }
    }
}

/// User-modifiable profile fields.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateInput {
    pub display_name: Option<String>,
    pub tee_shirt_size: Option<String>,
}
