use std::path::Path;

use colored::Colorize;
use zw_core::{
    FilterOptions, LocationId, Timeline, TimelineEntry, TravelerId, World,
};

pub fn run(file: &Path, id: &str, filters: &[String]) -> Result<(), String> {
    let world = super::load_world(file)?;
    let options = FilterOptions::parse_pairs(filters).map_err(|e| e.to_string())?;

    let timeline = if let Ok(location_id) = id.parse::<LocationId>() {
        let location = world.location(location_id).map_err(|e| e.to_string())?;
        println!("  Timeline for location '{}'", location.name);
        Timeline::for_location(&world, location_id, &options).map_err(|e| e.to_string())?
    } else if let Ok(traveler_id) = id.parse::<TravelerId>() {
        let traveler = world.traveler(traveler_id).map_err(|e| e.to_string())?;
        println!("  Timeline for traveler '{}'", traveler.name);
        Timeline::for_traveler(&world, traveler_id, &options).map_err(|e| e.to_string())?
    } else {
        return Err(format!(
            "'{id}' is not a location or traveler id (location- or traveler-<uuid>)"
        ));
    };

    println!();
    if timeline.is_empty() {
        println!("  No timeline entries.");
        return Ok(());
    }

    for entry in timeline.entries() {
        match entry {
            TimelineEntry::Move(mv) => {
                println!("  {:>12}  {}", mv.movement_type.to_string().dimmed(), mv.position);
            }
            TimelineEntry::Event(event_id) => {
                let label = event_name(&world, *event_id);
                println!("  {:>12}  {} ({event_id})", "event".bold(), label);
            }
        }
    }

    println!();
    println!("  {} entries", timeline.len());
    Ok(())
}

fn event_name(world: &World, id: zw_core::EventId) -> String {
    world
        .event(id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|_| id.to_string())
}
