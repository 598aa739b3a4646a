use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Left,
    Right,
    #[default]
    None,
}

/// Everything the player did during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCommands {
    /// Held direction key; exactly one of left/right/stop is issued per frame.
    pub movement: Movement,
    pub jump: bool,
    pub pause: bool,
    pub any_key: bool,
    pub restart: bool,
}

impl FrameCommands {
    /// True if any key went down this frame.
    pub fn key_pressed(&self) -> bool {
        self.any_key || self.jump || self.pause || self.restart
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default, rename = "move")]
    pub movement: Movement,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub pause: bool,
    #[serde(default)]
    pub any_key: bool,
    #[serde(default)]
    pub restart: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_commands(&self) -> Vec<FrameCommands> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(FrameCommands {
                    movement: frame.movement,
                    jump: frame.jump,
                    pause: frame.pause,
                    any_key: frame.any_key,
                    restart: frame.restart,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}
