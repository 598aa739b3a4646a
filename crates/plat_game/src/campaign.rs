//! Campaign manifest: the ordered level list plus simulation tuning overrides.

use crate::level_file::load_level_from_path;
use plat_core::{LevelDescriptor, SimConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct CampaignFile {
    /// Level files, relative to the manifest's directory.
    pub levels: Vec<PathBuf>,
    #[serde(default)]
    pub config: SimConfig,
}

#[derive(Debug, Clone)]
pub struct Campaign {
    pub config: SimConfig,
    pub levels: Vec<LevelDescriptor>,
}

pub fn load_campaign_from_path(manifest_path: &Path) -> Result<Campaign, String> {
    let raw = fs::read_to_string(manifest_path)
        .map_err(|e| format!("Failed to read campaign file {}: {e}", manifest_path.display()))?;
    let file: CampaignFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse campaign JSON {}: {e}", manifest_path.display()))?;
    validate_campaign(&file)?;

    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let levels = file
        .levels
        .iter()
        .map(|relative| load_level_from_path(&base_dir.join(relative)))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Loaded campaign {} with {} levels at {} fps",
        manifest_path.display(),
        levels.len(),
        file.config.frame_rate
    );
    Ok(Campaign {
        config: file.config,
        levels,
    })
}

fn validate_campaign(file: &CampaignFile) -> Result<(), String> {
    if file.levels.is_empty() {
        return Err("Campaign validation failed: levels array is empty".to_string());
    }
    file.config.validate()
}
