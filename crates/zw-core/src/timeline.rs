use std::collections::BTreeSet;

use crate::entity::{Event, EventId, LocationId, TravelerId};
use crate::error::ZwResult;
use crate::filter::{FilterOptions, filter_events};
use crate::journey::{MovementType, PositionalMove};
use crate::world::World;

/// One entry of a constructed timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEntry {
    /// A step of the traveler's own journey.
    Move(PositionalMove),
    /// An event encountered at this point of the walk.
    Event(EventId),
}

/// An ordered timeline for a location or traveler.
///
/// Timelines are derived values: they are recomputed on every request and
/// never stored. Construction is a pure function of the world's current
/// entities, so repeated calls with an unchanged world yield identical
/// output.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Build the timeline of a location: the events linked to it, ordered
    /// by ascending `(continuum.low, continuum.high)`.
    ///
    /// Events tied on both continuum bounds are ordered by event id, so
    /// output is deterministic.
    pub fn for_location(
        world: &World,
        id: LocationId,
        options: &FilterOptions,
    ) -> ZwResult<Self> {
        world.location(id)?;
        let candidates = world.events_affecting_location(id);
        let mut events = filter_events(candidates, options)?;
        events.sort_by(|a, b| {
            a.span
                .continuum
                .low()
                .total_cmp(&b.span.continuum.low())
                .then(a.span.continuum.high().total_cmp(&b.span.continuum.high()))
                .then(a.id.cmp(&b.id))
        });
        Ok(Self {
            entries: events
                .into_iter()
                .map(|e| TimelineEntry::Event(e.id))
                .collect(),
        })
    }

    /// Build the timeline of a traveler: its journey interleaved with the
    /// events encountered along the way.
    ///
    /// The walk keeps a set of active event ids (identity keys, so two
    /// events with identical spans stay distinct). At each move, events
    /// whose span no longer includes the position are pruned; events whose
    /// span now includes it and that are not active are discovered. An
    /// immediate move is emitted before its discoveries (the traveler
    /// arrives, then learns what applies there); an interpolated move is
    /// emitted after them (the traveler passed through the events' region
    /// en route). Leaving and re-entering a span re-emits the event;
    /// staying inside does not.
    ///
    /// Events discovered at the same move are emitted in ascending-id
    /// order, the same tie-break as in [`Timeline::for_location`].
    pub fn for_traveler(
        world: &World,
        id: TravelerId,
        options: &FilterOptions,
    ) -> ZwResult<Self> {
        let traveler = world.traveler(id)?;
        let candidates = world.events_affecting_traveler(id);
        let mut candidates: Vec<&Event> = filter_events(candidates, options)?;
        candidates.sort_by_key(|e| e.id);

        let mut entries = Vec::new();
        let mut active: BTreeSet<EventId> = BTreeSet::new();

        for mv in traveler.journey.moves() {
            active.retain(|event_id| {
                candidates
                    .iter()
                    .any(|e| e.id == *event_id && e.span.includes(mv.position))
            });

            let new_events: Vec<EventId> = candidates
                .iter()
                .filter(|e| e.span.includes(mv.position) && !active.contains(&e.id))
                .map(|e| e.id)
                .collect();
            active.extend(new_events.iter().copied());

            match mv.movement_type {
                MovementType::Immediate => {
                    entries.push(TimelineEntry::Move(*mv));
                    entries.extend(new_events.into_iter().map(TimelineEntry::Event));
                }
                MovementType::Interpolated => {
                    entries.extend(new_events.into_iter().map(TimelineEntry::Event));
                    entries.push(TimelineEntry::Move(*mv));
                }
            }
        }

        Ok(Self { entries })
    }

    /// The entries in timeline order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Only the event ids, in timeline order.
    pub fn event_ids(&self) -> Vec<EventId> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                TimelineEntry::Event(id) => Some(*id),
                TimelineEntry::Move(_) => None,
            })
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
