//! Conference query formatting.
//!
//! Translates symbolic (field, operator, value) filters into a store query.
//! Fields and operators pass through fixed allow-lists; at most one distinct
//! field may carry a non-equality operator, and that field becomes the
//! primary sort key (range queries require the first sort key to match the
//! inequality field).

use std::cmp::Ordering;

use crate::common::errors::{ApiError, ApiResult};
use crate::domains::conference::data::ConferenceFilterInput;
use crate::domains::conference::models::Conference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    City,
    Topics,
    Month,
    MaxAttendees,
}

impl QueryField {
    fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "CITY" => Some(Self::City),
            "TOPIC" => Some(Self::Topics),
            "MONTH" => Some(Self::Month),
            "MAX_ATTENDEES" => Some(Self::MaxAttendees),
            _ => None,
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Self::Month | Self::MaxAttendees)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    Eq,
    Gt,
    Gteq,
    Lt,
    Lteq,
    Ne,
}

impl QueryOp {
    fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "EQ" => Some(Self::Eq),
            "GT" => Some(Self::Gt),
            "GTEQ" => Some(Self::Gteq),
            "LT" => Some(Self::Lt),
            "LTEQ" => Some(Self::Lteq),
            "NE" => Some(Self::Ne),
            _ => None,
        }
    }

    /// Every operator except `=` is an inequality.
    fn is_inequality(self) -> bool {
        !matches!(self, Self::Eq)
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gteq => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Lteq => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone)]
pub struct BoundFilter {
    pub field: QueryField,
    pub op: QueryOp,
    pub value: FilterValue,
}

impl BoundFilter {
    fn matches(&self, conference: &Conference) -> bool {
        match (&self.field, &self.value) {
            (QueryField::City, FilterValue::Text(value)) => {
                self.op.holds(conference.city.as_str().cmp(value.as_str()))
            }
            // Topics is a repeated property: the filter holds if any element
            // satisfies it.
            (QueryField::Topics, FilterValue::Text(value)) => conference
                .topics
                .iter()
                .any(|topic| self.op.holds(topic.as_str().cmp(value.as_str()))),
            (QueryField::Month, FilterValue::Number(value)) => {
                self.op.holds(i64::from(conference.month).cmp(value))
            }
            (QueryField::MaxAttendees, FilterValue::Number(value)) => {
                self.op.holds(i64::from(conference.max_attendees).cmp(value))
            }
            _ => false,
        }
    }
}

/// Formatted, validated conference query ready for the store.
#[derive(Debug, Clone, Default)]
pub struct ConferenceQuery {
    pub filters: Vec<BoundFilter>,
    pub inequality_field: Option<QueryField>,
}

impl ConferenceQuery {
    pub fn matches(&self, conference: &Conference) -> bool {
        self.filters.iter().all(|filter| filter.matches(conference))
    }

    /// Order results: inequality field ascending first (when present), then
    /// conference name ascending.
    pub fn sort(&self, conferences: &mut [Conference]) {
        conferences.sort_by(|a, b| {
            let primary = match self.inequality_field {
                Some(QueryField::City) => a.city.cmp(&b.city),
                Some(QueryField::Topics) => a.topics.cmp(&b.topics),
                Some(QueryField::Month) => a.month.cmp(&b.month),
                Some(QueryField::MaxAttendees) => a.max_attendees.cmp(&b.max_attendees),
                None => Ordering::Equal,
            };
            primary.then_with(|| a.name.cmp(&b.name))
        });
    }
}

/// Parse, check validity and format user supplied filters.
pub fn build_query(filters: &[ConferenceFilterInput]) -> ApiResult<ConferenceQuery> {
    let mut bound = Vec::with_capacity(filters.len());
    let mut inequality_field: Option<QueryField> = None;

    for filter in filters {
        let field = QueryField::parse(&filter.field);
        let op = filter.operator.as_str();
        let (field, op) = match (field, QueryOp::parse(op)) {
            (Some(field), Some(op)) => (field, op),
            _ => {
                return Err(ApiError::BadRequest(
                    "Filter contains invalid field or operator.".to_string(),
                ))
            }
        };

        if op.is_inequality() {
            match inequality_field {
                Some(existing) if existing != field => {
                    return Err(ApiError::BadRequest(
                        "Inequality filter is allowed on only one field.".to_string(),
                    ))
                }
                _ => inequality_field = Some(field),
            }
        }

        let value = if field.is_numeric() {
            let number = filter.value.trim().parse::<i64>().map_err(|_| {
                ApiError::BadRequest(format!(
                    "Filter value for {} must be an integer.",
                    filter.field
                ))
            })?;
            FilterValue::Number(number)
        } else {
            FilterValue::Text(filter.value.clone())
        };

        bound.push(BoundFilter { field, op, value });
    }

    Ok(ConferenceQuery {
        filters: bound,
        inequality_field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(field: &str, operator: &str, value: &str) -> ConferenceFilterInput {
        ConferenceFilterInput {
            field: field.to_string(),
            operator: operator.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn one_inequality_beside_equalities_is_allowed() {
        let query = build_query(&[
            filter("MONTH", "EQ", "6"),
            filter("MAX_ATTENDEES", "GT", "10"),
        ])
        .unwrap();

        assert_eq!(query.inequality_field, Some(QueryField::MaxAttendees));
        assert_eq!(query.filters.len(), 2);
    }

    #[test]
    fn repeated_inequality_on_the_same_field_is_allowed() {
        let query = build_query(&[
            filter("MAX_ATTENDEES", "GT", "0"),
            filter("MAX_ATTENDEES", "LTEQ", "5"),
        ])
        .unwrap();
        assert_eq!(query.inequality_field, Some(QueryField::MaxAttendees));
    }

    #[test]
    fn a_second_inequality_field_is_rejected() {
        let err = build_query(&[filter("MONTH", "GT", "3"), filter("CITY", "LT", "M")])
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(message)
            if message.contains("only one field")));
    }

    #[test]
    fn unknown_field_or_operator_is_rejected() {
        assert!(build_query(&[filter("COLOR", "EQ", "red")]).is_err());
        assert!(build_query(&[filter("CITY", "LIKE", "London")]).is_err());
    }

    #[test]
    fn numeric_fields_coerce_textual_values() {
        let query = build_query(&[filter("MONTH", "EQ", "6")]).unwrap();
        assert_eq!(query.filters[0].value, FilterValue::Number(6));

        assert!(build_query(&[filter("MONTH", "EQ", "June")]).is_err());
    }
}
