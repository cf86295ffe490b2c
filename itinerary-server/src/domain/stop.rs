//! Raw feed rows and assembled stops.

use serde::{Deserialize, Serialize};

/// Number of fields in one feed row.
pub const ROW_FIELDS: usize = 7;

/// One decoded feed line, fields kept as untyped strings.
///
/// Field positions:
/// - `0`: order within the line
/// - `1`: description, a disposable prefix then a dash-separated name
/// - `2`: latitude
/// - `3`: direction marker (zero marks a terminus)
/// - `4`: longitude
/// - `5`, `6`: passed through as-is
///
/// Serializes as a plain 7-element JSON array, which is also the snapshot
/// format on disk. Numeric fields in a snapshot are read back as their
/// JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[SnapshotField; ROW_FIELDS]")]
pub struct RawRow(pub [String; ROW_FIELDS]);

/// A snapshot field as stored: text, or a bare JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotField {
    Text(String),
    Number(serde_json::Number),
}

impl From<SnapshotField> for String {
    fn from(field: SnapshotField) -> Self {
        match field {
            SnapshotField::Text(text) => text,
            SnapshotField::Number(number) => number.to_string(),
        }
    }
}

impl From<[SnapshotField; ROW_FIELDS]> for RawRow {
    fn from(fields: [SnapshotField; ROW_FIELDS]) -> Self {
        RawRow(fields.map(String::from))
    }
}

impl RawRow {
    /// Build a row from exactly [`ROW_FIELDS`] fields.
    ///
    /// Returns `None` if the field count is wrong.
    pub fn from_fields<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let fields: [String; ROW_FIELDS] = fields.try_into().ok()?;
        Some(RawRow(fields))
    }

    pub fn order(&self) -> &str {
        &self.0[0]
    }

    pub fn description(&self) -> &str {
        &self.0[1]
    }

    pub fn lat(&self) -> &str {
        &self.0[2]
    }

    pub fn marker(&self) -> &str {
        &self.0[3]
    }

    pub fn lon(&self) -> &str {
        &self.0[4]
    }

    pub fn extra1(&self) -> &str {
        &self.0[5]
    }

    pub fn extra2(&self) -> &str {
        &self.0[6]
    }
}

/// A stop on a line's itinerary, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Signed direction: the raw marker times the leg sign.
    pub direction: i64,
    /// Sequence number within the line.
    pub order: String,
    /// Human-readable stop name.
    pub name: String,
    pub lat: String,
    pub lon: String,
    pub extra1: String,
    pub extra2: String,
}
