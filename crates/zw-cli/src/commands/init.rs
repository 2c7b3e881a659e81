use std::path::{Path, PathBuf};

use zw_core::{World, WorldMeta};

pub fn run(name: &str, file: Option<&Path>) -> Result<(), String> {
    let path: PathBuf = match file {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("{name}.json")),
    };

    if path.exists() {
        return Err(format!("{} already exists", path.display()));
    }

    let world = World::new(WorldMeta::new(name));
    super::save_world(&path, &world)?;

    println!("Created world '{name}' at {}", path.display());
    Ok(())
}
