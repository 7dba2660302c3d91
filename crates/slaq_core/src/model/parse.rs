//! Typed field readers and parse reports for raw records.

use log::{log, Level};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw key-value record as delivered by the Slack web API.
pub type Record = Map<String, Value>;

/// Problem with one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Field absent or `null`.
    Missing,
    /// Field present with a different JSON type.
    WrongType { expected: &'static str },
    /// String field present but empty.
    Empty,
    /// Value outside the recognized set.
    Unrecognized(String),
    /// Value is not an absolute URL.
    InvalidUrl(String),
}

impl Display for FieldIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::WrongType { expected } => write!(f, "expected {expected}"),
            Self::Empty => write!(f, "empty"),
            Self::Unrecognized(value) => write!(f, "unrecognized value `{value}`"),
            Self::InvalidUrl(value) => write!(f, "invalid url `{value}`"),
        }
    }
}

/// Field issue bound to the field it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "field `{}`: {}", self.field, self.issue)
    }
}

impl Error for FieldError {}

/// Everything that went wrong while building one entity.
///
/// A fatal issue means the entity is unusable (its identity is missing);
/// warnings only mean some attribute fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    entity: &'static str,
    subject: Option<(&'static str, String)>,
    fatal: Option<FieldError>,
    warnings: Vec<FieldError>,
}

impl ParseReport {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            subject: None,
            fatal: None,
            warnings: Vec::new(),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Names the record in log lines, e.g. `("id", "U1")` or `("ts", "1.0")`.
    pub fn identify(&mut self, key: &'static str, value: impl Into<String>) {
        self.subject = Some((key, value.into()));
    }

    /// `entity=<entity>` followed by the identifying key, when one is set.
    pub fn subject(&self) -> String {
        match &self.subject {
            Some((key, value)) => format!("entity={} {}={}", self.entity, key, value),
            None => format!("entity={}", self.entity),
        }
    }

    pub fn warn(&mut self, field: &'static str, issue: FieldIssue) {
        self.warnings.push(FieldError { field, issue });
    }

    pub fn fail(&mut self, field: &'static str, issue: FieldIssue) {
        self.fatal = Some(FieldError { field, issue });
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.fatal.is_none() && self.warnings.is_empty()
    }

    pub fn fatal(&self) -> Option<&FieldError> {
        self.fatal.as_ref()
    }

    pub fn warnings(&self) -> &[FieldError] {
        &self.warnings
    }

    /// Returns the issue recorded for `field`, fatal or not.
    pub fn issue_for(&self, field: &str) -> Option<&FieldIssue> {
        self.fatal
            .iter()
            .chain(self.warnings.iter())
            .find(|error| error.field == field)
            .map(|error| &error.issue)
    }

    /// Emits one log line per issue; fatal issues always go out at `warn`.
    pub fn log(&self, level: Level) {
        if let Some(fatal) = &self.fatal {
            log!(
                Level::Warn,
                "event=entity_parse module=model status=rejected {} {}",
                self.subject(),
                fatal
            );
        }
        for warning in &self.warnings {
            log!(
                level,
                "event=entity_parse module=model status=degraded {} {}",
                self.subject(),
                warning
            );
        }
    }
}

/// An entity together with the report produced while parsing it.
#[derive(Debug)]
pub struct Parsed<T> {
    pub value: T,
    pub report: ParseReport,
}

pub fn read_string(record: &Record, field: &str) -> Result<String, FieldIssue> {
    match record.get(field) {
        None | Some(Value::Null) => Err(FieldIssue::Missing),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(FieldIssue::WrongType { expected: "string" }),
    }
}

pub fn read_non_empty_string(record: &Record, field: &str) -> Result<String, FieldIssue> {
    let value = read_string(record, field)?;
    if value.is_empty() {
        return Err(FieldIssue::Empty);
    }
    Ok(value)
}

pub fn read_bool(record: &Record, field: &str) -> Result<bool, FieldIssue> {
    match record.get(field) {
        None | Some(Value::Null) => Err(FieldIssue::Missing),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(FieldIssue::WrongType { expected: "bool" }),
    }
}

/// Reads an integer; integral floats such as `3.0` are accepted.
pub fn read_i64(record: &Record, field: &str) -> Result<i64, FieldIssue> {
    let wrong_type = FieldIssue::WrongType {
        expected: "integer",
    };
    match record.get(field) {
        None | Some(Value::Null) => Err(FieldIssue::Missing),
        Some(Value::Number(number)) => {
            if let Some(value) = number.as_i64() {
                return Ok(value);
            }
            match number.as_f64() {
                Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                    Ok(value as i64)
                }
                _ => Err(wrong_type),
            }
        }
        Some(_) => Err(wrong_type),
    }
}

pub fn read_object<'a>(record: &'a Record, field: &str) -> Result<&'a Record, FieldIssue> {
    match record.get(field) {
        None | Some(Value::Null) => Err(FieldIssue::Missing),
        Some(Value::Object(object)) => Ok(object),
        Some(_) => Err(FieldIssue::WrongType { expected: "object" }),
    }
}

pub fn read_array<'a>(record: &'a Record, field: &str) -> Result<&'a [Value], FieldIssue> {
    match record.get(field) {
        None | Some(Value::Null) => Err(FieldIssue::Missing),
        Some(Value::Array(values)) => Ok(values.as_slice()),
        Some(_) => Err(FieldIssue::WrongType { expected: "array" }),
    }
}

/// Reads the `id` field of a record.
///
/// Strings are used verbatim, numbers and booleans are stringified. Entities
/// and the cache both key on this value.
pub fn read_id(record: &Record) -> Result<String, FieldIssue> {
    let id = match record.get("id") {
        None | Some(Value::Null) => return Err(FieldIssue::Missing),
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        Some(Value::Bool(id)) => id.to_string(),
        Some(_) => return Err(FieldIssue::WrongType { expected: "string" }),
    };
    if id.is_empty() {
        return Err(FieldIssue::Empty);
    }
    Ok(id)
}

/// Derives the cache key of a record; unusable ids yield an empty key.
pub fn record_id(record: &Record) -> String {
    read_id(record).unwrap_or_default()
}
