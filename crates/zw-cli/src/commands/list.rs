use std::collections::BTreeSet;
use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use zw_core::FilterOptions;
use zw_core::filter::{filter_events, filter_locations, filter_travelers};

pub fn run(file: &Path, kind: &str, filters: &[String]) -> Result<(), String> {
    let world = super::load_world(file)?;
    let options = FilterOptions::parse_pairs(filters).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Tags", "Description"]);

    let count = match kind {
        "locations" | "location" => {
            let mut hits =
                filter_locations(world.all_locations(), &options).map_err(|e| e.to_string())?;
            hits.sort_by(|a, b| a.name.cmp(&b.name));
            for l in &hits {
                table.add_row(vec![
                    l.id.to_string(),
                    l.name.clone(),
                    render_tags(&l.tags),
                    super::preview(&l.description),
                ]);
            }
            hits.len()
        }
        "travelers" | "traveler" => {
            let mut hits =
                filter_travelers(world.all_travelers(), &options).map_err(|e| e.to_string())?;
            hits.sort_by(|a, b| a.name.cmp(&b.name));
            for t in &hits {
                table.add_row(vec![
                    t.id.to_string(),
                    t.name.clone(),
                    render_tags(&t.tags),
                    super::preview(&t.description),
                ]);
            }
            hits.len()
        }
        "events" | "event" => {
            let mut hits =
                filter_events(world.all_events(), &options).map_err(|e| e.to_string())?;
            hits.sort_by(|a, b| a.name.cmp(&b.name));
            for e in &hits {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    render_tags(&e.tags),
                    super::preview(&e.description),
                ]);
            }
            hits.len()
        }
        other => {
            return Err(format!(
                "unknown kind '{other}' (expected locations, travelers, or events)"
            ));
        }
    };

    if count == 0 {
        println!("  No entities found.");
        return Ok(());
    }

    println!("{table}");
    println!();
    println!("  {count} entities");

    Ok(())
}

fn render_tags(tags: &BTreeSet<String>) -> String {
    if tags.is_empty() {
        "—".to_string()
    } else {
        tags.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
