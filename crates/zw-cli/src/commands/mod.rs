pub mod check;
pub mod init;
pub mod list;
pub mod show;
pub mod timeline;

use std::fs;
use std::path::Path;

use zw_core::{World, WorldSnapshot};

/// Load and validate a world file.
fn load_world(path: &Path) -> Result<World, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let snapshot: WorldSnapshot = serde_json::from_str(&contents)
        .map_err(|e| format!("{} is not a valid world file: {e}", path.display()))?;
    World::from_snapshot(snapshot).map_err(|e| e.to_string())
}

/// Write a world file, replacing any previous contents.
fn save_world(path: &Path, world: &World) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&world.snapshot())
        .map_err(|e| format!("cannot serialize world: {e}"))?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

/// Truncate a description for table display.
fn preview(description: &str) -> String {
    let line = description.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        "—".to_string()
    } else if line.len() > 60 {
        format!("{}...", &line[..57])
    } else {
        line.to_string()
    }
}
