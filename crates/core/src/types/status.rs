//! Payment provider status codes and the severities they map to.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Failure status returned by the payment provider on a callback.
///
/// The provider sends these as upper-case strings. Matching is exact: a
/// lower-case `abort` is not `ABORT` and lands in [`StatusCode::Unrecognized`],
/// which keeps the raw value for logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The customer cancelled on the provider's payment page.
    Abort,
    /// The bank did not authorise the transaction.
    NotAuthed,
    /// The provider's fraud rules rejected the transaction.
    Rejected,
    /// The request was missing fields or badly formatted.
    Malformed,
    /// The request contained invalid field values.
    Invalid,
    /// The provider hit an internal error.
    Error,
    /// Any value outside the known set.
    Unrecognized(String),
}

impl StatusCode {
    /// Parse a raw provider status. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ABORT" => Self::Abort,
            "NOTAUTHED" => Self::NotAuthed,
            "REJECTED" => Self::Rejected,
            "MALFORMED" => Self::Malformed,
            "INVALID" => Self::Invalid,
            "ERROR" => Self::Error,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// The wire form of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Abort => "ABORT",
            Self::NotAuthed => "NOTAUTHED",
            Self::Rejected => "REJECTED",
            Self::Malformed => "MALFORMED",
            Self::Invalid => "INVALID",
            Self::Error => "ERROR",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for StatusCode {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Severity a classified provider response is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Needs immediate attention: the customer's payment did not go through.
    Alert,
    /// A failure on the request or the provider side.
    Error,
}

impl LogLevel {
    /// Lower-case name, as used in structured log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Error => "error",
        }
    }
}

/// Category of the message shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    #[default]
    Error,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(StatusCode::parse("ABORT"), StatusCode::Abort);
        assert_eq!(StatusCode::parse("NOTAUTHED"), StatusCode::NotAuthed);
        assert_eq!(StatusCode::parse("REJECTED"), StatusCode::Rejected);
        assert_eq!(StatusCode::parse("MALFORMED"), StatusCode::Malformed);
        assert_eq!(StatusCode::parse("INVALID"), StatusCode::Invalid);
        assert_eq!(StatusCode::parse("ERROR"), StatusCode::Error);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            StatusCode::parse("abort"),
            StatusCode::Unrecognized("abort".to_owned())
        );
    }

    #[test]
    fn test_unrecognized_keeps_raw_value() {
        let code = StatusCode::parse("UNKNOWN_CODE");
        assert_eq!(code.to_string(), "UNKNOWN_CODE");
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let json = serde_json::to_string(&StatusCode::NotAuthed).unwrap();
        assert_eq!(json, "\"NOTAUTHED\"");

        let parsed: StatusCode = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(parsed, StatusCode::Unrecognized("OK".to_owned()));
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::Alert.as_str(), "alert");
        assert_eq!(
            serde_json::to_string(&LogLevel::Error).unwrap(),
            "\"error\""
        );
    }
}
