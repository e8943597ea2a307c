//! Date handling for API payloads.
//!
//! The API sends dates either as `YYYY-MM-DD` or as a full ISO timestamp.
//! Only the calendar day matters to the client, so everything is reduced to
//! a `NaiveDate` (midnight resolution).

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the calendar day out of a date or timestamp string from the API.
/// Anything after the day must start with a `T` or a space.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let day = match trimmed.get(10..) {
        Some(rest) if rest.is_empty() || rest.starts_with(['T', ' ']) => &trimmed[..10],
        _ => trimmed,
    };
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Strict `YYYY-MM-DD` parse for dates typed into a form.
pub fn parse_form_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDate>` fields. Unparseable values become `None`.
pub mod optional {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&super::format_day(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_day))
    }
}
