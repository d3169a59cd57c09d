// src/core/frontmatter/validation.rs
use crate::core::frontmatter::RawFrontmatter;
use crate::models::Frontmatter;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter is not valid UTF-8")]
    NotUtf8,

    #[error("failed to parse frontmatter: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("frontmatter must be a YAML mapping, found {0}")]
    NotMapping(&'static str),

    #[error("invalid date format in frontmatter: {0}")]
    InvalidDate(String),
}

/// Checks that a frontmatter block is a YAML mapping and that its `date`
/// field, when present, holds a calendar date.
///
/// An empty block (or one holding only comments) is an empty mapping.
///
/// # Errors
///
/// Returns a [`FrontmatterError`] describing the first problem found. Callers
/// treat every variant as a warning: the document is still included.
pub fn validate_frontmatter(raw: &RawFrontmatter) -> Result<Frontmatter, FrontmatterError> {
    let text = std::str::from_utf8(raw.text()).map_err(|_| FrontmatterError::NotUtf8)?;
    if text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    }) {
        return Ok(Frontmatter::default());
    }

    let fields = match serde_yaml_ng::from_str::<Value>(text)? {
        Value::Mapping(fields) => fields,
        Value::Null => Mapping::new(),
        other => return Err(FrontmatterError::NotMapping(kind_of(&other))),
    };
    let frontmatter = Frontmatter { fields };

    if let Some(date) = frontmatter.date() {
        let valid = date.as_str().is_some_and(|s| parse_date(s).is_some());
        if !valid {
            return Err(FrontmatterError::InvalidDate(render(date)));
        }
    }

    Ok(frontmatter)
}

/// Parses the date forms accepted in a `date` field: `YYYY-MM-DD`, RFC 3339
/// timestamps, and local date-times with a `T` or space separator.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|datetime| datetime.date())
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml_ng::to_string(other)
            .map_or_else(|_| kind_of(other).to_owned(), |s| s.trim_end().to_owned()),
    }
}
