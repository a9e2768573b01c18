use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::common::errors::{ApiError, ApiResult};
use crate::common::keys::ConferenceKey;

/// Defaults applied when a conference is created without these fields.
pub const DEFAULT_CITY: &str = "Default City";
pub const DEFAULT_TOPICS: [&str; 2] = ["Default", "Topic"];

/// Conference record, keyed under its organizer's profile.
///
/// Invariant at rest: `0 <= seats_available <= max_attendees`. Only the
/// registration engine mutates `seats_available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conference {
    pub key: ConferenceKey,
    pub name: String,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub city: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Derived from `start_date`; 0 when no start date is set.
    pub month: u32,
    pub max_attendees: i32,
    pub seats_available: i32,
}

impl Conference {
    /// Recompute the derived month after a start-date change.
    pub fn sync_month(&mut self) {
        self.month = self.start_date.map(|d| d.month()).unwrap_or(0);
    }
}

/// Parse a `YYYY-MM-DD` date, tolerating a trailing time component.
pub fn parse_date(value: &str) -> ApiResult<NaiveDate> {
    let prefix = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {value}")))
}
