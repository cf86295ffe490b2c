//! Transit line identifiers.

use std::fmt;

/// Maximum accepted length of a line identifier.
const MAX_LEN: usize = 32;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line identifier: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// A validated transit line identifier.
///
/// Line identifiers are used both as a cache file name and as a path segment
/// of the provider URL, so they are restricted to ASCII letters, digits,
/// `-` and `_`.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::LineId;
///
/// let line = LineId::parse("485").unwrap();
/// assert_eq!(line.as_str(), "485");
///
/// // Path separators are rejected
/// assert!(LineId::parse("../etc").is_err());
///
/// // Empty is rejected
/// assert!(LineId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        if s.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidLineId {
                reason: "must be at most 32 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidLineId {
                reason: "must contain only ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(LineId(s.to_string()))
    }

    /// Parse a line identifier, ignoring surrounding whitespace.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLineId> {
        Self::parse(s.trim())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
