use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path) -> Result<(), String> {
    let world = super::load_world(file)?;

    println!("  {} {}", "world".bold(), world.meta.name);
    if !world.meta.description.is_empty() {
        println!("  {}", world.meta.description);
    }
    println!();
    println!(
        "  {} locations, {} travelers, {} events",
        world.location_count(),
        world.traveler_count(),
        world.event_count()
    );
    println!("  {}", "ok".green());

    Ok(())
}
