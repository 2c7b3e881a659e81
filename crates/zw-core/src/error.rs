use crate::entity::{EventId, LocationId, TravelerId};

/// Alias for `Result<T, ZwError>`.
pub type ZwResult<T> = Result<T, ZwError>;

/// Errors that can occur when constructing domain values or querying a world.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZwError {
    /// A range was constructed with its bounds inverted.
    #[error("invalid range: low ({low}) exceeds high ({high})")]
    RangeInverted {
        /// The offending lower bound, rendered for display.
        low: String,
        /// The offending upper bound, rendered for display.
        high: String,
    },

    /// A positional range was constructed with no realities.
    #[error("positional range must occupy at least one reality")]
    EmptyRealitySet,

    /// A journey was constructed with no moves.
    #[error("journey must contain at least one move")]
    EmptyJourney,

    /// A journey's first move is not immediate.
    #[error("journey must begin with an immediate move")]
    JourneyNotAnchored,

    /// An interpolated move crossed from one reality into another.
    #[error("interpolated move cannot cross realities ({from} to {to})")]
    InterpolatedRealityShift {
        /// Reality of the preceding move.
        from: i64,
        /// Reality of the interpolated move.
        to: i64,
    },

    /// An interpolated move traveled backward along the continuum.
    #[error("interpolated move cannot decrease continuum ({from} to {to})")]
    ContinuumReversal {
        /// Continuum of the preceding move.
        from: f64,
        /// Continuum of the interpolated move.
        to: f64,
    },

    /// The requested location does not exist in this world.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// The requested traveler does not exist in this world.
    #[error("traveler not found: {0}")]
    TravelerNotFound(TravelerId),

    /// The requested event does not exist in this world.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// An entity with the same identifier already exists.
    #[error("duplicate identifier: {0}")]
    DuplicateId(String),

    /// A replacement entity carries a different identifier than the original.
    #[error("replacement id {given} does not match stored id {stored}")]
    IdMismatch {
        /// The identifier carried by the replacement.
        given: String,
        /// The identifier of the stored entity.
        stored: String,
    },

    /// An event names an affected entity whose footprint it does not reach.
    #[error("event \"{event}\" does not intersect {entity}")]
    DisjointSpan {
        /// Name of the event.
        event: String,
        /// Prefixed identifier of the affected entity.
        entity: String,
    },

    /// A filter key no stage of the filter chain recognizes or can consume.
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
