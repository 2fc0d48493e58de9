//! Identifier types shared across the workspace.
//!
//! [`LookupRequest`] carries whatever the caller handed over, untouched.
//! [`NationalId`] only exists once that raw value has passed validation.

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Number of digits in a national identifier.
pub const NATIONAL_ID_LEN: usize = 14;

/// Newtype for a validated 14-digit national identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Create a new `NationalId` from a string.
    ///
    /// The string is kept exactly as given; nothing is trimmed.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidFormat`] unless the whole string is
    /// exactly 14 ASCII digits.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Validate an arbitrary, loosely-typed value.
    ///
    /// Non-string values are rejected with [`ValidationError::WrongType`] so a
    /// numeric cell can never silently lose its leading zeros.
    pub fn validate_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            other => Err(ValidationError::WrongType {
                found: json_type_name(other),
            }),
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), ValidationError> {
        static NATIONAL_ID_REGEX: OnceLock<Regex> = OnceLock::new();
        // `\d` would accept non-ASCII digits
        let regex = NATIONAL_ID_REGEX.get_or_init(|| {
            Regex::new(&format!("^[0-9]{{{NATIONAL_ID_LEN}}}$")).expect("valid regex")
        });

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(ValidationError::InvalidFormat)
        }
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for NationalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A single lookup request: the raw identifier exactly as the caller supplied it.
///
/// Spreadsheet-backed callers hand over cells that may be numbers, booleans or
/// empty, so the raw value is kept as JSON rather than forced into a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupRequest(Value);

impl LookupRequest {
    /// Wrap a raw value without inspecting it.
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Correlation key for results.
    ///
    /// String input is returned verbatim. Anything else uses its JSON
    /// rendering, e.g. `29501011234567` for a number or `null`.
    #[must_use]
    pub fn identifier(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Validate the raw value into a [`NationalId`].
    pub fn validate(&self) -> Result<NationalId, ValidationError> {
        NationalId::validate_value(&self.0)
    }
}

impl From<&str> for LookupRequest {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for LookupRequest {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<&String> for LookupRequest {
    fn from(value: &String) -> Self {
        Self(Value::String(value.clone()))
    }
}

impl From<i64> for LookupRequest {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<u64> for LookupRequest {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl From<f64> for LookupRequest {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

impl From<Value> for LookupRequest {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<NationalId> for LookupRequest {
    fn from(value: NationalId) -> Self {
        Self(Value::String(value.0))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_national_id_valid() {
        let id = NationalId::new("29501011234567").expect("valid id");
        assert_eq!(id.as_str(), "29501011234567");
        assert_eq!(id.to_string(), "29501011234567");

        // Leading zeros survive untouched
        let id = NationalId::new("00000000000001").expect("valid id");
        assert_eq!(id.as_str(), "00000000000001");
    }

    #[test]
    fn test_national_id_rejects_bad_format() {
        let bad = [
            "",
            "2950101123456",
            "295010112345678",
            "2950101123456a",
            "a2950101123456",
            "29501-01123456",
            "+2950101123456",
            " 29501011234567",
            "29501011234567 ",
            "29501011234567\n",
            "2950101 234567",
            "٢٩٥٠١٠١١٢٣٤٥٦٧",
        ];

        for input in bad {
            assert_eq!(
                NationalId::new(input),
                Err(ValidationError::InvalidFormat),
                "expected format error for {input:?}"
            );
        }
    }

    #[test]
    fn test_validate_value_wrong_type() {
        let cases = [
            (json!(29_501_011_234_567_i64), "number"),
            (json!(29_501_011_234_567.0_f64), "number"),
            (json!(true), "boolean"),
            (Value::Null, "null"),
            (json!(["29501011234567"]), "array"),
            (json!({"id": "29501011234567"}), "object"),
        ];

        for (value, found) in cases {
            assert_eq!(
                NationalId::validate_value(&value),
                Err(ValidationError::WrongType { found }),
            );
        }
    }

    #[test]
    fn test_validate_value_string() {
        let id = NationalId::validate_value(&json!("30012251234568")).expect("valid id");
        assert_eq!(id.as_str(), "30012251234568");

        assert_eq!(
            NationalId::validate_value(&json!("123456789")),
            Err(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn test_lookup_request_identifier_is_verbatim() {
        assert_eq!(LookupRequest::from(" 295 ").identifier(), " 295 ");
        assert_eq!(LookupRequest::from("").identifier(), "");
        assert_eq!(
            LookupRequest::from(29_501_011_234_567_i64).identifier(),
            "29501011234567"
        );
        assert_eq!(LookupRequest::new(Value::Null).identifier(), "null");
    }

    #[test]
    fn test_lookup_request_validate() {
        let request = LookupRequest::from("29501011234567");
        assert_eq!(
            request.validate().expect("valid").as_str(),
            "29501011234567"
        );

        let request = LookupRequest::from(29_501_011_234_567_u64);
        assert!(matches!(
            request.validate(),
            Err(ValidationError::WrongType { found: "number" })
        ));
    }

    #[test]
    fn test_national_id_serde() {
        let id = NationalId::new("29501011234567").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"29501011234567\"");

        let parsed: NationalId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<NationalId>("\"12\"").is_err());
    }

    #[test]
    fn test_lookup_request_deserializes_any_json() {
        let request: LookupRequest = serde_json::from_str("29501011234567").expect("parse");
        assert!(request.raw().is_number());

        let request: LookupRequest = serde_json::from_str("\"29501011234567\"").expect("parse");
        assert!(request.validate().is_ok());
    }
}
