use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Event, EventId, Location, LocationId, Traveler, TravelerId};
use crate::error::{ZwError, ZwResult};

/// Metadata about the world itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Display name of the world.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Snapshot format version.
    pub schema_version: u32,
    /// Timestamp when the world was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the world was last modified.
    pub updated_at: DateTime<Utc>,
}

impl WorldMeta {
    /// Create metadata for a new world.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: String::new(),
            schema_version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The entity store for one world. Owns all locations, travelers, and
/// events, and maintains the event indexes the timeline queries read.
///
/// Membership in a `World` is the association check: an entity stored in a
/// different world is simply not found here.
#[derive(Debug, Clone)]
pub struct World {
    /// Metadata about the world.
    pub meta: WorldMeta,
    locations: HashMap<LocationId, Location>,
    travelers: HashMap<TravelerId, Traveler>,
    events: HashMap<EventId, Event>,

    // Indexes: which events affect which entity.
    events_by_location: HashMap<LocationId, Vec<EventId>>,
    events_by_traveler: HashMap<TravelerId, Vec<EventId>>,
}

impl World {
    /// Create an empty world.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            locations: HashMap::new(),
            travelers: HashMap::new(),
            events: HashMap::new(),
            events_by_location: HashMap::new(),
            events_by_traveler: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Location CRUD
    // -----------------------------------------------------------------------

    /// Add a location. Returns its ID.
    pub fn add_location(&mut self, location: Location) -> ZwResult<LocationId> {
        if self.locations.contains_key(&location.id) {
            return Err(ZwError::DuplicateId(location.id.to_string()));
        }
        let id = location.id;
        self.locations.insert(id, location);
        Ok(id)
    }

    /// Retrieve a location, failing with not-found if absent.
    pub fn location(&self, id: LocationId) -> ZwResult<&Location> {
        self.locations.get(&id).ok_or(ZwError::LocationNotFound(id))
    }

    /// Replace a location wholesale. The replacement must carry the same ID.
    pub fn replace_location(&mut self, location: Location) -> ZwResult<()> {
        let stored = self
            .locations
            .get_mut(&location.id)
            .ok_or(ZwError::LocationNotFound(location.id))?;
        *stored = location;
        Ok(())
    }

    /// Remove a location and unlink it from any events that affected it.
    pub fn remove_location(&mut self, id: LocationId) -> ZwResult<Location> {
        let location = self
            .locations
            .remove(&id)
            .ok_or(ZwError::LocationNotFound(id))?;
        if let Some(event_ids) = self.events_by_location.remove(&id) {
            for event_id in event_ids {
                if let Some(event) = self.events.get_mut(&event_id) {
                    event.affected_locations.remove(&id);
                }
            }
        }
        Ok(location)
    }

    /// All locations, in no particular order.
    pub fn all_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    // -----------------------------------------------------------------------
    // Traveler CRUD
    // -----------------------------------------------------------------------

    /// Add a traveler. Returns its ID.
    pub fn add_traveler(&mut self, traveler: Traveler) -> ZwResult<TravelerId> {
        if self.travelers.contains_key(&traveler.id) {
            return Err(ZwError::DuplicateId(traveler.id.to_string()));
        }
        let id = traveler.id;
        self.travelers.insert(id, traveler);
        Ok(id)
    }

    /// Retrieve a traveler, failing with not-found if absent.
    pub fn traveler(&self, id: TravelerId) -> ZwResult<&Traveler> {
        self.travelers.get(&id).ok_or(ZwError::TravelerNotFound(id))
    }

    /// Replace a traveler wholesale. The replacement must carry the same ID.
    pub fn replace_traveler(&mut self, traveler: Traveler) -> ZwResult<()> {
        let stored = self
            .travelers
            .get_mut(&traveler.id)
            .ok_or(ZwError::TravelerNotFound(traveler.id))?;
        *stored = traveler;
        Ok(())
    }

    /// Remove a traveler and unlink it from any events that affected it.
    pub fn remove_traveler(&mut self, id: TravelerId) -> ZwResult<Traveler> {
        let traveler = self
            .travelers
            .remove(&id)
            .ok_or(ZwError::TravelerNotFound(id))?;
        if let Some(event_ids) = self.events_by_traveler.remove(&id) {
            for event_id in event_ids {
                if let Some(event) = self.events.get_mut(&event_id) {
                    event.affected_travelers.remove(&id);
                }
            }
        }
        Ok(traveler)
    }

    /// All travelers, in no particular order.
    pub fn all_travelers(&self) -> impl Iterator<Item = &Traveler> {
        self.travelers.values()
    }

    // -----------------------------------------------------------------------
    // Event CRUD
    // -----------------------------------------------------------------------

    /// Add an event. Every affected location/traveler must exist and its
    /// footprint must intersect the event's span. Returns the event's ID.
    pub fn add_event(&mut self, event: Event) -> ZwResult<EventId> {
        if self.events.contains_key(&event.id) {
            return Err(ZwError::DuplicateId(event.id.to_string()));
        }
        self.validate_event_links(&event)?;
        let id = event.id;
        self.index_event(&event);
        self.events.insert(id, event);
        Ok(id)
    }

    /// Retrieve an event, failing with not-found if absent.
    pub fn event(&self, id: EventId) -> ZwResult<&Event> {
        self.events.get(&id).ok_or(ZwError::EventNotFound(id))
    }

    /// Replace an event wholesale, revalidating links and reindexing.
    /// On a failed validation the stored event is left untouched.
    pub fn replace_event(&mut self, event: Event) -> ZwResult<()> {
        let old = self
            .events
            .remove(&event.id)
            .ok_or(ZwError::EventNotFound(event.id))?;
        if let Err(e) = self.validate_event_links(&event) {
            self.events.insert(old.id, old);
            return Err(e);
        }
        self.unindex_event(&old);
        self.index_event(&event);
        self.events.insert(event.id, event);
        Ok(())
    }

    /// Remove an event.
    pub fn remove_event(&mut self, id: EventId) -> ZwResult<Event> {
        let event = self.events.remove(&id).ok_or(ZwError::EventNotFound(id))?;
        self.unindex_event(&event);
        Ok(event)
    }

    /// All events, in no particular order.
    pub fn all_events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    fn validate_event_links(&self, event: &Event) -> ZwResult<()> {
        for location_id in &event.affected_locations {
            let location = self.location(*location_id)?;
            if !event.span.intersects(&location.span) {
                return Err(ZwError::DisjointSpan {
                    event: event.name.clone(),
                    entity: location_id.to_string(),
                });
            }
        }
        for traveler_id in &event.affected_travelers {
            let traveler = self.traveler(*traveler_id)?;
            if !traveler.journey.intersects(&event.span) {
                return Err(ZwError::DisjointSpan {
                    event: event.name.clone(),
                    entity: traveler_id.to_string(),
                });
            }
        }
        Ok(())
    }

    fn index_event(&mut self, event: &Event) {
        for location_id in &event.affected_locations {
            self.events_by_location
                .entry(*location_id)
                .or_default()
                .push(event.id);
        }
        for traveler_id in &event.affected_travelers {
            self.events_by_traveler
                .entry(*traveler_id)
                .or_default()
                .push(event.id);
        }
    }

    fn unindex_event(&mut self, event: &Event) {
        for location_id in &event.affected_locations {
            if let Some(ids) = self.events_by_location.get_mut(location_id) {
                ids.retain(|eid| *eid != event.id);
            }
        }
        for traveler_id in &event.affected_travelers {
            if let Some(ids) = self.events_by_traveler.get_mut(traveler_id) {
                ids.retain(|eid| *eid != event.id);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Index queries
    // -----------------------------------------------------------------------

    /// Events linked to a location through its affected set.
    pub fn events_affecting_location(&self, id: LocationId) -> Vec<&Event> {
        self.events_by_location
            .get(&id)
            .map(|ids| ids.iter().filter_map(|eid| self.events.get(eid)).collect())
            .unwrap_or_default()
    }

    /// Events linked to a traveler through its affected set.
    pub fn events_affecting_traveler(&self, id: TravelerId) -> Vec<&Event> {
        self.events_by_traveler
            .get(&id)
            .map(|ids| ids.iter().filter_map(|eid| self.events.get(eid)).collect())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of travelers.
    pub fn traveler_count(&self) -> usize {
        self.travelers.len()
    }

    /// Number of events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// The serde-facing form of a world: metadata plus flat entity lists.
///
/// Loading goes back through [`World::from_snapshot`], which re-runs all
/// link validation and rebuilds the event indexes, so a hand-edited file
/// cannot introduce dangling or disjoint references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Metadata about the world.
    pub meta: WorldMeta,
    /// All locations.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// All travelers.
    #[serde(default)]
    pub travelers: Vec<Traveler>,
    /// All events.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl World {
    /// Produce the serializable snapshot of this world.
    ///
    /// Entity lists are sorted by ID so snapshots are stable across runs.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut locations: Vec<Location> = self.locations.values().cloned().collect();
        locations.sort_by_key(|l| l.id);
        let mut travelers: Vec<Traveler> = self.travelers.values().cloned().collect();
        travelers.sort_by_key(|t| t.id);
        let mut events: Vec<Event> = self.events.values().cloned().collect();
        events.sort_by_key(|e| e.id);
        WorldSnapshot {
            meta: self.meta.clone(),
            locations,
            travelers,
            events,
        }
    }

    /// Rebuild a world from a snapshot, revalidating everything.
    pub fn from_snapshot(snapshot: WorldSnapshot) -> ZwResult<Self> {
        let mut world = World::new(snapshot.meta);
        for location in snapshot.locations {
            world.add_location(location)?;
        }
        for traveler in snapshot.travelers {
            world.add_traveler(traveler)?;
        }
        for event in snapshot.events {
            world.add_event(event)?;
        }
        Ok(world)
    }
}
