//! Core types for Zeitenwanderer: entities positioned in a five-dimensional
//! space (latitude, longitude, altitude, the temporal continuum, and the
//! discrete reality axis) and the timelines derived from them.
//!
//! This crate is independent of any frontend — you can construct a
//! [`World`] programmatically or load one from a JSON snapshot, then ask
//! for the [`Timeline`] of any location or traveler.

/// Entity identifiers and the location/traveler/event records.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Predicate filters over entity sets.
pub mod filter;
/// Journeys: ordered movement histories.
pub mod journey;
/// Positions and positional ranges in the five-dimensional space.
pub mod position;
/// Closed interval arithmetic.
pub mod range;
/// Timeline construction for locations and travelers.
pub mod timeline;
/// The world model that owns entities and event indexes.
pub mod world;

/// Re-export entity types.
pub use entity::{Event, EventId, Location, LocationId, Traveler, TravelerId};
/// Re-export error types.
pub use error::{ZwError, ZwResult};
/// Re-export filter types.
pub use filter::FilterOptions;
/// Re-export journey types.
pub use journey::{Journey, MovementType, PositionalMove};
/// Re-export geometry types.
pub use position::{Position, PositionalRange};
/// Re-export interval arithmetic.
pub use range::Range;
/// Re-export timeline types.
pub use timeline::{Timeline, TimelineEntry};
/// Re-export world model types.
pub use world::{World, WorldMeta, WorldSnapshot};
