//! Structural validation for create and update shapes.
//!
//! Create shapes are read field by field out of a JSON object so that every
//! offending field is reported at once and no partially-built record escapes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

const MAX_EMAIL_LEN: usize = 254;

const EMAIL_REASON: &str = "must be a valid email address";

const TIMESTAMP_REASON: &str = "must be an ISO 8601 date or timestamp";

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("invalid email regex")
});

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    #[error("input must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// The field this error is about, if it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::InvalidType { field, .. }
            | Self::Empty { field }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. } => Some(*field),
            Self::NotAnObject => None,
        }
    }

    fn for_field(self, name: &'static str) -> Self {
        match self {
            Self::Missing { .. } => Self::Missing { field: name },
            Self::InvalidType { expected, .. } => Self::InvalidType {
                field: name,
                expected,
            },
            Self::Empty { .. } => Self::Empty { field: name },
            Self::InvalidFormat { reason, .. } => Self::InvalidFormat {
                field: name,
                reason,
            },
            Self::InvalidVariant { value, .. } => Self::InvalidVariant { field: name, value },
            Self::NotAnObject => Self::NotAnObject,
        }
    }
}

/// Every validation failure found while building one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Names of the offending fields, in the order they were found.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().filter_map(ValidationError::field).collect()
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.0.iter().any(|e| e.field() == Some(name))
    }

    /// Push an [`ValidationError::Empty`] when `value` is blank.
    pub fn require_text(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(ValidationError::Empty { field });
        }
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

/// Content rules checked after a shape has been built, whether it came from
/// JSON or was constructed directly in code.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A value that can be read out of a single JSON field.
pub trait FieldValue: Sized {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError>;
}

impl FieldValue for String {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or(ValidationError::InvalidType {
                field,
                expected: "a string",
            })
    }
}

impl FieldValue for i64 {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        value.as_i64().ok_or(ValidationError::InvalidType {
            field,
            expected: "an integer",
        })
    }
}

impl FieldValue for i32 {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(ValidationError::InvalidType {
                field,
                expected: "a 32-bit integer",
            })
    }
}

impl FieldValue for Decimal {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Number(n) => parse_decimal(n).ok_or(ValidationError::InvalidFormat {
                field,
                reason: "number is out of range",
            }),
            _ => Err(ValidationError::InvalidType {
                field,
                expected: "a number",
            }),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        let raw = value.as_str().ok_or(ValidationError::InvalidType {
            field,
            expected: "a timestamp string",
        })?;
        parse_timestamp(raw).ok_or(ValidationError::InvalidFormat {
            field,
            reason: TIMESTAMP_REASON,
        })
    }
}

impl FieldValue for Email {
    fn from_field(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        let raw = String::from_field(field, value)?;
        Email::parse(raw).map_err(|e| e.for_field(field))
    }
}

fn parse_decimal(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// RFC 3339, or a naive ISO-8601 timestamp read as UTC. A bare date is
/// midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Reader over the fields of one JSON object.
///
/// Failed reads are recorded and a placeholder is returned; [`Fields::finish`]
/// refuses to hand back a value built from placeholders.
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    pub fn of(value: &'a Value) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                errors: ValidationErrors::new(),
            }),
            _ => Err(ValidationError::NotAnObject.into()),
        }
    }

    // null counts as absent
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub fn required<T: FieldValue + Default>(&mut self, field: &'static str) -> T {
        let Some(value) = self.present(field) else {
            self.errors.push(ValidationError::Missing { field });
            return T::default();
        };
        T::from_field(field, value).unwrap_or_else(|e| {
            self.errors.push(e);
            T::default()
        })
    }

    pub fn optional<T: FieldValue>(&mut self, field: &'static str) -> Option<T> {
        let value = self.present(field)?;
        match T::from_field(field, value) {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        self.errors.into_result().map(|()| value)
    }
}

/// Shapes (or shared field sets) that know which fields they read.
pub trait FromFields: Sized {
    fn from_fields(fields: &mut Fields<'_>) -> Self;
}

/// Build a shape from JSON, checking structure first and content second.
pub fn parse<T: FromFields + Validate>(value: &Value) -> Result<T, ValidationErrors> {
    let mut fields = Fields::of(value)?;
    let shape = T::from_fields(&mut fields);
    let shape = fields.finish(shape)?;
    shape.validate()?;
    Ok(shape)
}

/// An email address in a plausible `local@domain.tld` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(&s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: EMAIL_REASON,
            });
        }
        Ok(Self(s))
    }

    /// Wrap a value read back from the database, where only validated
    /// addresses are ever written.
    pub(crate) fn from_stored(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
