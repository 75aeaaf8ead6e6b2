// File: ./src/model/adapter.rs
// Handles JSON envelopes and date normalization for request bodies
use crate::error::InvalidDate;
use crate::model::item::{Party, PartyFields};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;

/// Every read endpoint wraps its payload as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Normalizes a date input to ISO-8601 UTC with millisecond precision.
///
/// Accepts a bare `YYYY-MM-DD` (taken as midnight UTC) or any RFC 3339
/// timestamp, which is converted to UTC.
pub fn normalize_date(input: &str) -> Result<String, InvalidDate> {
    let trimmed = input.trim();

    let instant = if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        dt.with_timezone(&Utc)
    } else if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        day.and_hms_opt(0, 0, 0)
            .ok_or_else(|| InvalidDate(input.to_string()))?
            .and_utc()
    } else {
        return Err(InvalidDate(input.to_string()));
    };

    Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl PartyFields {
    /// Builds a request body from raw form inputs.
    pub fn from_inputs(
        name: &str,
        date: &str,
        description: &str,
        location: &str,
    ) -> Result<Self, InvalidDate> {
        Ok(Self {
            name: name.to_string(),
            date: normalize_date(date)?,
            description: description.to_string(),
            location: location.to_string(),
        })
    }
}

impl Party {
    /// The calendar day part of `date`, as shown in the detail panel.
    pub fn display_date(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    pub fn matches(&self, fields: &PartyFields) -> bool {
        self.name == fields.name
            && self.description == fields.description
            && self.location == fields.location
            && normalize_date(&self.date).as_deref() == Ok(fields.date.as_str())
    }
}
