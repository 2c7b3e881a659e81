use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ZwError, ZwResult};
use crate::range::Range;

/// A point in the five-dimensional space: four continuous axes plus the
/// discrete reality axis (the universe-branch index).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// North-south coordinate.
    pub latitude: f64,
    /// East-west coordinate.
    pub longitude: f64,
    /// Height above the reference plane.
    pub altitude: f64,
    /// Temporal coordinate.
    pub continuum: f64,
    /// Which branch of the multiverse this point sits in.
    pub reality: i64,
}

impl Position {
    /// Create a position from its five coordinates.
    pub fn new(latitude: f64, longitude: f64, altitude: f64, continuum: f64, reality: i64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            continuum,
            reality,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) @ {} in reality {}",
            self.latitude, self.longitude, self.altitude, self.continuum, self.reality
        )
    }
}

/// A hyper-rectangle in the five-dimensional space: a closed range on each
/// continuous axis plus a finite, non-empty set of realities.
///
/// Realities are unordered branch identifiers, so the fifth axis is handled
/// as set membership rather than interval arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionalRange {
    /// North-south extent.
    pub latitude: Range<f64>,
    /// East-west extent.
    pub longitude: Range<f64>,
    /// Vertical extent.
    pub altitude: Range<f64>,
    /// Temporal extent.
    pub continuum: Range<f64>,
    reality: BTreeSet<i64>,
}

impl PositionalRange {
    /// Create a positional range. The reality set must be non-empty.
    pub fn new(
        latitude: Range<f64>,
        longitude: Range<f64>,
        altitude: Range<f64>,
        continuum: Range<f64>,
        reality: impl IntoIterator<Item = i64>,
    ) -> ZwResult<Self> {
        let reality: BTreeSet<i64> = reality.into_iter().collect();
        if reality.is_empty() {
            return Err(ZwError::EmptyRealitySet);
        }
        Ok(Self {
            latitude,
            longitude,
            altitude,
            continuum,
            reality,
        })
    }

    /// The degenerate range occupying exactly one position.
    pub fn at(position: Position) -> Self {
        Self {
            latitude: Range::at(position.latitude),
            longitude: Range::at(position.longitude),
            altitude: Range::at(position.altitude),
            continuum: Range::at(position.continuum),
            reality: BTreeSet::from([position.reality]),
        }
    }

    /// The realities this range occupies.
    pub fn realities(&self) -> &BTreeSet<i64> {
        &self.reality
    }

    /// True iff every continuous axis includes the corresponding coordinate
    /// and the position's reality is one of this range's realities.
    pub fn includes(&self, position: Position) -> bool {
        self.latitude.includes(position.latitude)
            && self.longitude.includes(position.longitude)
            && self.altitude.includes(position.altitude)
            && self.continuum.includes(position.continuum)
            && self.reality.contains(&position.reality)
    }

    /// True iff every continuous axis intersects the other's and the two
    /// reality sets share at least one branch.
    pub fn intersects(&self, other: &PositionalRange) -> bool {
        self.latitude.intersects(&other.latitude)
            && self.longitude.intersects(&other.longitude)
            && self.altitude.intersects(&other.altitude)
            && self.continuum.intersects(&other.continuum)
            && !self.reality.is_disjoint(&other.reality)
    }
}

impl<'de> Deserialize<'de> for PositionalRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: Range<f64>,
            longitude: Range<f64>,
            altitude: Range<f64>,
            continuum: Range<f64>,
            reality: BTreeSet<i64>,
        }
        let raw = Raw::deserialize(deserializer)?;
        PositionalRange::new(
            raw.latitude,
            raw.longitude,
            raw.altitude,
            raw.continuum,
            raw.reality,
        )
        .map_err(serde::de::Error::custom)
    }
}
