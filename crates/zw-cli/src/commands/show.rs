use std::path::Path;

use colored::Colorize;
use zw_core::{
    Event, EventId, Location, LocationId, PositionalRange, Traveler, TravelerId, World,
};

pub fn run(file: &Path, id: &str) -> Result<(), String> {
    let world = super::load_world(file)?;

    if let Ok(location_id) = id.parse::<LocationId>() {
        let location = world.location(location_id).map_err(|e| e.to_string())?;
        show_location(&world, location);
        Ok(())
    } else if let Ok(traveler_id) = id.parse::<TravelerId>() {
        let traveler = world.traveler(traveler_id).map_err(|e| e.to_string())?;
        show_traveler(&world, traveler);
        Ok(())
    } else if let Ok(event_id) = id.parse::<EventId>() {
        let event = world.event(event_id).map_err(|e| e.to_string())?;
        show_event(event);
        Ok(())
    } else {
        Err(format!(
            "'{id}' is not a prefixed entity id (location-, traveler-, or event-<uuid>)"
        ))
    }
}

fn show_header(kind: &str, id: &str, name: &str, description: &str, tags: String) {
    println!("  {} {}", kind.bold(), name);
    println!("  {}", id.dimmed());
    if !tags.is_empty() {
        println!("  tags: {tags}");
    }
    if !description.is_empty() {
        println!();
        println!("  {description}");
    }
}

fn show_span(span: &PositionalRange) {
    println!();
    println!("  latitude   {}", span.latitude);
    println!("  longitude  {}", span.longitude);
    println!("  altitude   {}", span.altitude);
    println!("  continuum  {}", span.continuum);
    let realities: Vec<String> = span.realities().iter().map(|r| r.to_string()).collect();
    println!("  realities  {{{}}}", realities.join(", "));
}

fn show_location(world: &World, location: &Location) {
    show_header(
        "location",
        &location.id.to_string(),
        &location.name,
        &location.description,
        tags_line(&location.tags),
    );
    show_span(&location.span);
    let affecting = world.events_affecting_location(location.id);
    if !affecting.is_empty() {
        println!();
        println!("  affected by {} event(s)", affecting.len());
    }
}

fn show_traveler(world: &World, traveler: &Traveler) {
    show_header(
        "traveler",
        &traveler.id.to_string(),
        &traveler.name,
        &traveler.description,
        tags_line(&traveler.tags),
    );
    println!();
    println!("  journey ({} moves):", traveler.journey.len());
    for mv in traveler.journey.moves() {
        println!("    {:>12}  {}", mv.movement_type.to_string(), mv.position);
    }
    let affecting = world.events_affecting_traveler(traveler.id);
    if !affecting.is_empty() {
        println!();
        println!("  affected by {} event(s)", affecting.len());
    }
}

fn show_event(event: &Event) {
    show_header(
        "event",
        &event.id.to_string(),
        &event.name,
        &event.description,
        tags_line(&event.tags),
    );
    show_span(&event.span);
    if !event.affected_locations.is_empty() || !event.affected_travelers.is_empty() {
        println!();
        for id in &event.affected_locations {
            println!("  affects {id}");
        }
        for id in &event.affected_travelers {
            println!("  affects {id}");
        }
    }
}

fn tags_line(tags: &std::collections::BTreeSet<String>) -> String {
    tags.iter().cloned().collect::<Vec<_>>().join(", ")
}
