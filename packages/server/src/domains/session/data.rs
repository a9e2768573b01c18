use serde::{Deserialize, Serialize};

use crate::common::errors::{ApiError, ApiResult};
use crate::domains::conference::models::parse_date;
use crate::domains::session::models::{Session, SessionFilter, SessionRole, SessionType};

/// Session payload returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub websafe_session_key: String,
    pub websafe_conference_key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
    pub type_of_session: SessionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub role: SessionRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub duration: i32,
}

impl From<Session> for SessionData {
    fn from(session: Session) -> Self {
        Self {
            websafe_session_key: session.key.websafe(),
            websafe_conference_key: session.key.conference.websafe(),
            name: session.name,
            highlights: session.highlights,
            type_of_session: session.type_of_session,
            speaker: session.speaker,
            role: session.role,
            location: session.location,
            date: session.date.map(|d| d.to_string()),
            start_time: session.start_time.map(|t| t.format("%H:%M").to_string()),
            duration: session.duration,
        }
    }
}

/// Fields accepted when creating a session.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionInput {
    pub session_name: Option<String>,
    pub highlights: Option<String>,
    pub type_of_session: Option<String>,
    pub speaker: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<i32>,
}

/// Equality filters for a session listing, all optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilterInput {
    pub name: Option<String>,
    pub speaker: Option<String>,
    pub type_of_session: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl SessionFilterInput {
    pub fn into_filter(self) -> ApiResult<SessionFilter> {
        let type_of_session = self
            .type_of_session
            .as_deref()
            .map(|value| {
                SessionType::parse(value).ok_or_else(|| {
                    ApiError::BadRequest(format!("Unknown session type: {value}"))
                })
            })
            .transpose()?;
        let role = self
            .role
            .as_deref()
            .map(|value| {
                SessionRole::parse(value)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown session role: {value}")))
            })
            .transpose()?;
        let date = self.date.as_deref().map(parse_date).transpose()?;

        Ok(SessionFilter {
            name: self.name,
            speaker: self.speaker,
            type_of_session,
            role,
            location: self.location,
            date,
        })
    }
}

/// Body of the wishlist add/remove operations. The optional speaker narrows
/// the name lookup.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WishlistInput {
    pub session_name: Option<String>,
    pub speaker: Option<String>,
}

/// Body of the `addSpeaker` operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSpeakerInput {
    pub name: String,
    pub websafe_session_key: String,
}
