use plat_core::LevelDescriptor;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn load_level_from_path(level_path: &Path) -> Result<LevelDescriptor, String> {
    let raw = fs::read_to_string(level_path)
        .map_err(|e| format!("Failed to read level file {}: {e}", level_path.display()))?;
    let level: LevelDescriptor = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", level_path.display()))?;
    validate_level_file(&level)
        .map_err(|e| format!("{e} ({})", level_path.display()))?;
    Ok(level)
}

fn validate_level_file(level: &LevelDescriptor) -> Result<(), String> {
    level.validate()?;

    // Two blocks in one cell would be drawn twice and double the collision work.
    let mut cells = HashSet::new();
    for &(x, y, _) in &level.blocks {
        if !cells.insert((x, y)) {
            return Err(format!(
                "Level validation failed: duplicate block at ({x}, {y})"
            ));
        }
    }
    if cells.contains(&(level.start[0], level.start[1])) {
        return Err(format!(
            "Level validation failed: start ({}, {}) is inside a block",
            level.start[0], level.start[1]
        ));
    }
    if level.blocks.is_empty() {
        log::warn!("Level has no blocks. This is allowed but often accidental.");
    }
    Ok(())
}
