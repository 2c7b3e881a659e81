use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ZwError, ZwResult};
use crate::journey::Journey;
use crate::position::PositionalRange;

/// Unique identifier for a location. Rendered with the `location-` prefix
/// used as the store key format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(pub Uuid);

/// Unique identifier for a traveler. Rendered with the `traveler-` prefix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TravelerId(pub Uuid);

/// Unique identifier for an event. Rendered with the `event-` prefix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(pub Uuid);

fn parse_prefixed(prefix: &str, s: &str) -> ZwResult<Uuid> {
    let raw = s
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(|| {
            ZwError::Validation(format!("identifier \"{s}\" does not start with \"{prefix}-\""))
        })?;
    Uuid::parse_str(raw)
        .map_err(|_| ZwError::Validation(format!("identifier \"{s}\" is not a valid uuid")))
}

macro_rules! id_impls {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The store-key prefix for this identifier kind.
            pub const PREFIX: &'static str = $prefix;
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $ty {
            type Err = ZwError;

            fn from_str(s: &str) -> ZwResult<Self> {
                parse_prefixed($prefix, s).map(Self)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ZwError;

            fn try_from(s: String) -> ZwResult<Self> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.to_string()
            }
        }
    };
}

id_impls!(LocationId, "location");
id_impls!(TravelerId, "traveler");
id_impls!(EventId, "event");

/// Validate an entity name: non-empty after trimming.
pub fn validate_name(name: &str) -> ZwResult<()> {
    if name.trim().is_empty() {
        return Err(ZwError::Validation("entity name must not be empty".into()));
    }
    Ok(())
}

/// Normalize a tag set: trimmed, lowercased, empties dropped.
pub fn normalize_tags(tags: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A fixed region of the five-dimensional space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The region this location occupies.
    pub span: PositionalRange,
    /// User-defined tags for categorization and filtering.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Arbitrary key-value metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Location {
    /// Create a location with a random identifier.
    pub fn new(name: impl Into<String>, span: PositionalRange) -> ZwResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: LocationId::new(),
            name,
            description: String::new(),
            span,
            tags: BTreeSet::new(),
            metadata: HashMap::new(),
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach tags (normalized).
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = normalize_tags(tags);
        self
    }
}

/// An entity that moves through the five-dimensional space along a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traveler {
    /// Unique identifier.
    pub id: TravelerId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The traveler's ordered movement history.
    pub journey: Journey,
    /// User-defined tags for categorization and filtering.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Arbitrary key-value metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Traveler {
    /// Create a traveler with a random identifier.
    pub fn new(name: impl Into<String>, journey: Journey) -> ZwResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: TravelerId::new(),
            name,
            description: String::new(),
            journey,
            tags: BTreeSet::new(),
            metadata: HashMap::new(),
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach tags (normalized).
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = normalize_tags(tags);
        self
    }
}

/// Something that happened in a region of the five-dimensional space,
/// linked to the locations and travelers it affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The region and time interval the event covers.
    pub span: PositionalRange,
    /// Locations whose span the event intersects.
    #[serde(default)]
    pub affected_locations: BTreeSet<LocationId>,
    /// Travelers whose journey the event intersects.
    #[serde(default)]
    pub affected_travelers: BTreeSet<TravelerId>,
    /// User-defined tags for categorization and filtering.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Arbitrary key-value metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Event {
    /// Create an event with a random identifier and no affected entities.
    pub fn new(name: impl Into<String>, span: PositionalRange) -> ZwResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: EventId::new(),
            name,
            description: String::new(),
            span,
            affected_locations: BTreeSet::new(),
            affected_travelers: BTreeSet::new(),
            tags: BTreeSet::new(),
            metadata: HashMap::new(),
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach tags (normalized).
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = normalize_tags(tags);
        self
    }

    /// Mark a location as affected by this event.
    pub fn affecting_location(mut self, id: LocationId) -> Self {
        self.affected_locations.insert(id);
        self
    }

    /// Mark a traveler as affected by this event.
    pub fn affecting_traveler(mut self, id: TravelerId) -> Self {
        self.affected_travelers.insert(id);
        self
    }
}
