use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ZwError, ZwResult};
use crate::position::{Position, PositionalRange};

/// How an entity reaches the position of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// The entity appears directly at the position, touching no intervening
    /// space.
    Immediate,
    /// The entity travels continuously from the previous move's position,
    /// passing through all intermediate points.
    Interpolated,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Interpolated => write!(f, "interpolated"),
        }
    }
}

/// One step of a journey: where the entity went and how it got there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionalMove {
    /// The position reached by this move.
    pub position: Position,
    /// How the position was reached.
    pub movement_type: MovementType,
}

impl PositionalMove {
    /// An immediate move to `position`.
    pub fn immediate(position: Position) -> Self {
        Self {
            position,
            movement_type: MovementType::Immediate,
        }
    }

    /// An interpolated move to `position`.
    pub fn interpolated(position: Position) -> Self {
        Self {
            position,
            movement_type: MovementType::Interpolated,
        }
    }
}

/// An ordered, validated sequence of moves describing how an entity travels
/// through the five-dimensional space.
///
/// Invariants, enforced at construction and on deserialization:
/// - at least one move;
/// - the first move is immediate (there is no previous point to
///   interpolate from);
/// - an interpolated move stays in the previous move's reality and never
///   decreases continuum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Journey {
    moves: Vec<PositionalMove>,
}

impl Journey {
    /// Create a journey from an ordered list of moves.
    pub fn new(moves: Vec<PositionalMove>) -> ZwResult<Self> {
        let first = moves.first().ok_or(ZwError::EmptyJourney)?;
        if first.movement_type != MovementType::Immediate {
            return Err(ZwError::JourneyNotAnchored);
        }
        for pair in moves.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.movement_type != MovementType::Interpolated {
                continue;
            }
            if next.position.reality != prev.position.reality {
                return Err(ZwError::InterpolatedRealityShift {
                    from: prev.position.reality,
                    to: next.position.reality,
                });
            }
            if next.position.continuum < prev.position.continuum {
                return Err(ZwError::ContinuumReversal {
                    from: prev.position.continuum,
                    to: next.position.continuum,
                });
            }
        }
        Ok(Self { moves })
    }

    /// The moves in travel order.
    pub fn moves(&self) -> &[PositionalMove] {
        &self.moves
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Always false: a journey has at least one move by construction.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The most recent position, i.e. where the entity currently is.
    pub fn current_position(&self) -> Position {
        // Non-empty by construction.
        self.moves[self.moves.len() - 1].position
    }

    /// True if any move of the journey lands exactly on `position`.
    pub fn includes(&self, position: Position) -> bool {
        self.moves.iter().any(|m| m.position == position)
    }

    /// True if any move of the journey lands inside `range`.
    ///
    /// The journey is treated as a linear point sequence, so a path that
    /// merely passes through `range` between two moves does not count.
    pub fn intersects(&self, range: &PositionalRange) -> bool {
        self.moves.iter().any(|m| range.includes(m.position))
    }
}

impl<'de> Deserialize<'de> for Journey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let moves = Vec::<PositionalMove>::deserialize(deserializer)?;
        Journey::new(moves).map_err(serde::de::Error::custom)
    }
}
