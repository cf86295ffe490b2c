//! Direction inference and stop assembly.
//!
//! The feed never says which leg a stop belongs to. It only marks termini
//! with a zero direction marker. Walking the rows in order, the first
//! terminus starts the outbound leg and the second starts the return leg;
//! every stop's marker is signed by the leg it falls in.

use tracing::warn;

use crate::domain::{RawRow, Stop};

/// Leg of the round trip the pass is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegState {
    /// No terminus seen yet.
    #[default]
    Undetermined,
    /// One terminus seen.
    Outbound,
    /// Two or more termini seen.
    Return,
}

impl LegState {
    /// Advance on a row's marker. Only termini (zero) move the state, and
    /// only twice.
    pub fn advance(self, marker: i64) -> Self {
        match (marker, self) {
            (0, LegState::Undetermined) => LegState::Outbound,
            (0, LegState::Outbound) => LegState::Return,
            (_, state) => state,
        }
    }

    /// Sign applied to markers in this leg.
    ///
    /// Stops before the first terminus count as outbound, so markers
    /// `[1, 0, 1]` come out as `[1, 0, 1]`, matching the line "100" lookup
    /// that the service tests pin down end to end.
    pub fn sign(self) -> i64 {
        match self {
            LegState::Undetermined | LegState::Outbound => 1,
            LegState::Return => -1,
        }
    }
}

/// Drop the first dash-separated segment of a description.
///
/// `"12-Downtown-Main St"` becomes `"Downtown-Main St"`.
pub fn clean_name(description: &str) -> String {
    description
        .split_once('-')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default()
}

/// Numeric value of a direction marker.
///
/// A blank marker counts as a terminus (zero). Integral decimals such as
/// `"1.0"` or `"0.0"` are accepted. Anything else gives `None`.
pub fn parse_marker(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    if let Ok(marker) = raw.parse::<i64>() {
        return Some(marker);
    }

    let value = raw.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Turn raw rows into stops, in feed order.
///
/// Every row becomes a stop. A row whose marker can't be read gets
/// direction 0 and leaves the leg state alone.
pub fn assemble(rows: &[RawRow]) -> Vec<Stop> {
    let (_, stops) = rows.iter().fold(
        (LegState::default(), Vec::with_capacity(rows.len())),
        |(state, mut stops), row| {
            let (state, direction) = match parse_marker(row.marker()) {
                Some(marker) => {
                    // The terminus row itself already belongs to the new leg.
                    let state = state.advance(marker);
                    (state, marker.saturating_mul(state.sign()))
                }
                None => {
                    warn!(
                        order = row.order(),
                        marker = row.marker(),
                        "unreadable direction marker, using 0"
                    );
                    (state, 0)
                }
            };

            stops.push(Stop {
                direction,
                order: row.order().to_string(),
                name: clean_name(row.description()),
                lat: row.lat().to_string(),
                lon: row.lon().to_string(),
                extra1: row.extra1().to_string(),
                extra2: row.extra2().to_string(),
            });
            (state, stops)
        },
    );
    stops
}
