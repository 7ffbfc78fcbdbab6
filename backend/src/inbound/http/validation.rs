//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers only check presence and shape here; value rules (span, catalogue
//! membership) belong to the domain services.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!(
        "{field} must be a calendar date (YYYY-MM-DD) or an RFC 3339 timestamp"
    ))
    .with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidDate.as_str(),
    }))
}

/// Require a non-empty string; blank values count as absent.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse a travel date given as `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub(crate) fn parse_travel_date(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_date_error(field, value))
}

/// Require and parse a travel date.
pub(crate) fn require_travel_date(
    value: Option<String>,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    let raw = require_text(value, field)?;
    parse_travel_date(&raw, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use chrono::TimeZone;
    use rstest::rstest;

    const START: FieldName = FieldName::new("starting_date");

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_values_are_missing(#[case] value: Option<String>) {
        let err = require_text(value, START).expect_err("missing");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "starting_date", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case("2024-06-05", Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0))]
    #[case("2024-06-05T10:30:00Z", Utc.with_ymd_and_hms(2024, 6, 5, 10, 30, 0))]
    #[case("2024-06-05T12:00:00+02:00", Utc.with_ymd_and_hms(2024, 6, 5, 10, 0, 0))]
    fn accepts_dates_and_timestamps(
        #[case] raw: &str,
        #[case] expected: chrono::LocalResult<DateTime<Utc>>,
    ) {
        let parsed = parse_travel_date(raw, START).expect("valid date");
        assert_eq!(Some(parsed), expected.single());
    }

    #[rstest]
    #[case("05/06/2024")]
    #[case("2024-13-01")]
    #[case("tomorrow")]
    fn rejects_unparseable_dates(#[case] raw: &str) {
        let err = parse_travel_date(raw, START).expect_err("invalid");
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_date"))
        );
    }
}
