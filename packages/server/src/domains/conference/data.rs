use serde::{Deserialize, Serialize};

use crate::domains::conference::models::Conference;

/// Conference payload returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    pub websafe_conference_key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub month: u32,
    pub max_attendees: i32,
    pub seats_available: i32,
    pub organizer_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_display_name: Option<String>,
}

impl ConferenceData {
    pub fn from_model(conference: Conference, organizer_display_name: Option<String>) -> Self {
        Self {
            websafe_conference_key: conference.key.websafe(),
            organizer_user_id: conference.key.organizer.to_string(),
            name: conference.name,
            description: conference.description,
            topics: conference.topics,
            city: conference.city,
            start_date: conference.start_date.map(|d| d.to_string()),
            end_date: conference.end_date.map(|d| d.to_string()),
            month: conference.month,
            max_attendees: conference.max_attendees,
            seats_available: conference.seats_available,
            organizer_display_name,
        }
    }
}

/// Fields accepted when creating a conference.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_attendees: Option<i32>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConferenceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_attendees: Option<i32>,
}

/// One (field, operator, value) filter of a conference query.
#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceFilterInput {
    pub field: String,
    pub operator: String,
    pub value: String,
}

/// Body of the `queryConferences` operation.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConferenceQueryInput {
    #[serde(default)]
    pub filters: Vec<ConferenceFilterInput>,
}
