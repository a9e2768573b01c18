use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::common::errors::{ApiError, ApiResult};
use crate::common::keys::SessionKey;

pub const DEFAULT_DURATION_MINUTES: i32 = 50;

/// Kind of session. Closed set; unknown inputs are rejected, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    #[default]
    Tbd,
    Workshop,
    Lecture,
    Keynote,
    Demonstration,
}

impl SessionType {
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
    }
}

/// Role of the session's presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionRole {
    #[default]
    Speaker,
    Host,
    Moderator,
    Panelist,
}

impl SessionRole {
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
    }
}

/// Session record, keyed under its parent conference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub key: SessionKey,
    pub name: String,
    pub highlights: Option<String>,
    pub type_of_session: SessionType,
    pub speaker: Option<String>,
    pub role: SessionRole,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration: i32,
}

/// Equality filters applied to a conference's session listing. All present
/// fields must match.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub name: Option<String>,
    pub speaker: Option<String>,
    pub type_of_session: Option<SessionType>,
    pub role: Option<SessionRole>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
}

impl SessionFilter {
    pub fn matches(&self, session: &Session) -> bool {
        if let Some(name) = &self.name {
            if &session.name != name {
                return false;
            }
        }
        if let Some(speaker) = &self.speaker {
            if session.speaker.as_ref() != Some(speaker) {
                return false;
            }
        }
        if let Some(type_of_session) = self.type_of_session {
            if session.type_of_session != type_of_session {
                return false;
            }
        }
        if let Some(role) = self.role {
            if session.role != role {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if session.location.as_ref() != Some(location) {
                return false;
            }
        }
        if let Some(date) = self.date {
            if session.date != Some(date) {
                return false;
            }
        }
        true
    }
}

/// Parse a `HH:MM` time, tolerating trailing seconds.
pub fn parse_time(value: &str) -> ApiResult<NaiveTime> {
    let prefix = value.get(..5).unwrap_or(value);
    NaiveTime::parse_from_str(prefix, "%H:%M")
        .map_err(|_| ApiError::BadRequest(format!("Invalid time (expected HH:MM): {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::keys::{ConferenceKey, UserId};

    fn session(name: &str, speaker: Option<&str>) -> Session {
        let conference = ConferenceKey::allocate(UserId::new("o@example.com"));
        Session {
            key: SessionKey::allocate(conference),
            name: name.to_string(),
            highlights: None,
            type_of_session: SessionType::default(),
            speaker: speaker.map(str::to_string),
            role: SessionRole::default(),
            location: None,
            date: None,
            start_time: None,
            duration: DEFAULT_DURATION_MINUTES,
        }
    }

    #[test]
    fn enums_parse_their_wire_names_only() {
        assert_eq!(SessionType::parse("KEYNOTE"), Some(SessionType::Keynote));
        assert_eq!(SessionType::parse("TBD"), Some(SessionType::Tbd));
        assert_eq!(SessionType::parse("keynote"), None);
        assert_eq!(SessionRole::parse("PANELIST"), Some(SessionRole::Panelist));
        assert_eq!(SessionRole::parse("DJ"), None);
    }

    #[test]
    fn filter_requires_all_present_fields_to_match() {
        let s = session("Rust 101", Some("Niki"));

        let mut filter = SessionFilter {
            speaker: Some("Niki".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&s));

        filter.name = Some("Go 101".to_string());
        assert!(!filter.matches(&s));
    }

    #[test]
    fn time_parsing_accepts_seconds_suffix() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:30:45").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("half past nine").is_err());
    }
}
