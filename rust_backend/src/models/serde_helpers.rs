//! Lenient deserializers for documents exported from the realtime store.
//!
//! Records are edited through loosely-validated forms, so dates may be blank,
//! timestamps, or garbage, and numbers sometimes arrive as strings. None of
//! that is allowed to fail a load: unparseable values become `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Int(i64),
    Number(f64),
    Other(serde::de::IgnoredAny),
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 / ISO timestamp.
///
/// Returns `None` for anything else, including empty strings.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Deserialize an optional date, mapping malformed input to `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(s)) => parse_calendar_date(&s),
        _ => None,
    })
}

/// Deserialize an optional finite number from a JSON number or numeric string.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Int(i)) => Some(i as f64),
        Some(LooseValue::Number(n)) => Some(n),
        Some(LooseValue::Text(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

/// Deserialize a string that may be absent or null as an empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(s)) => s,
        Some(LooseValue::Int(i)) => i.to_string(),
        Some(LooseValue::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Deserialize an optional text field; numbers are kept as their decimal
/// text, anything else becomes `None`.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(s)) => Some(s),
        Some(LooseValue::Int(i)) => Some(i.to_string()),
        Some(LooseValue::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserialize a document key that may be stored as a string or an integer.
pub fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer) {
        Ok(StringOrInt::String(s)) => Ok(s),
        Ok(StringOrInt::Int(i)) => Ok(i.to_string()),
        Err(_) => Err(D::Error::custom("expected a string or integer key")),
    }
}

/// Deserialize skill tags given either as an array or a comma-joined string.
pub fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match lenient_tags_value(deserializer)? {
        Some(Tags::List(list)) => clean_tags(list),
        Some(Tags::Joined(joined)) => split_tags(&joined).map(str::to_string).collect(),
        _ => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Tags {
    List(Vec<String>),
    Joined(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_tags_value<'de, D>(deserializer: D) -> Result<Option<Tags>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Tags>::deserialize(deserializer)
}

fn clean_tags(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Deserialize skill tags into their comma-joined form.
///
/// A string is kept as-is, an array is joined with `", "`, and an empty
/// array or any other value becomes `None`.
pub fn lenient_joined_tags<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = lenient_tags_value(deserializer)?;
    Ok(match tags {
        Some(Tags::Joined(joined)) => Some(joined),
        Some(Tags::List(list)) => {
            let joined = clean_tags(list).join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    })
}

/// Split a comma-joined tag string, trimming and dropping empty entries.
pub fn split_tags(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(',').map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_date")]
        date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "lenient_number")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_tags")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "lenient_joined_tags")]
        joined: Option<String>,
        #[serde(default, deserialize_with = "lenient_opt_string")]
        label: Option<String>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_calendar_date("2024-03-15"), expected);
        assert_eq!(parse_calendar_date(" 2024-03-15 "), expected);
        assert_eq!(parse_calendar_date("2024-03-15T10:30:00Z"), expected);
        assert_eq!(parse_calendar_date("2024-03-15T10:30:00.250"), expected);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("15/03/2024"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
    }

    #[test]
    fn test_lenient_date_never_fails() {
        assert!(probe(r#"{"date": "not a date"}"#).date.is_none());
        assert!(probe(r#"{"date": null}"#).date.is_none());
        assert!(probe(r#"{"date": 12345}"#).date.is_none());
        assert!(probe(r#"{}"#).date.is_none());
        assert_eq!(
            probe(r#"{"date": "2024-01-01"}"#).date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_lenient_number() {
        assert_eq!(probe(r#"{"amount": 250}"#).amount, Some(250.0));
        assert_eq!(probe(r#"{"amount": 99.5}"#).amount, Some(99.5));
        assert_eq!(probe(r#"{"amount": " 400 "}"#).amount, Some(400.0));
        assert_eq!(probe(r#"{"amount": "abc"}"#).amount, None);
        assert_eq!(probe(r#"{"amount": [1, 2]}"#).amount, None);
        assert_eq!(probe(r#"{"amount": "NaN"}"#).amount, None);
    }

    #[test]
    fn test_lenient_tags() {
        assert_eq!(
            probe(r#"{"tags": "Compositing, Lighting ,,FX"}"#).tags,
            vec!["Compositing", "Lighting", "FX"]
        );
        assert_eq!(
            probe(r#"{"tags": [" Rigging ", ""]}"#).tags,
            vec!["Rigging"]
        );
        assert!(probe(r#"{"tags": 7}"#).tags.is_empty());
    }

    #[test]
    fn test_lenient_joined_tags() {
        assert_eq!(
            probe(r#"{"joined": "Lighting, FX"}"#).joined.as_deref(),
            Some("Lighting, FX")
        );
        assert_eq!(
            probe(r#"{"joined": [" Rigging ", "", "FX"]}"#).joined.as_deref(),
            Some("Rigging, FX")
        );
        assert_eq!(probe(r#"{"joined": []}"#).joined, None);
        assert_eq!(probe(r#"{"joined": {"a": 1}}"#).joined, None);
        assert_eq!(probe(r#"{}"#).joined, None);
    }

    #[test]
    fn test_lenient_opt_string() {
        assert_eq!(probe(r#"{"label": "Ana"}"#).label.as_deref(), Some("Ana"));
        assert_eq!(probe(r#"{"label": 42}"#).label.as_deref(), Some("42"));
        assert_eq!(probe(r#"{"label": null}"#).label, None);
        assert_eq!(probe(r#"{"label": ["x"]}"#).label, None);
    }
}
