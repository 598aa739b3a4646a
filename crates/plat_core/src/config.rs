//! Simulation tuning. Everything here is data, loaded from JSON by the driver
//! with missing fields falling back to the defaults below.

use serde::{Deserialize, Serialize};

/// How a Heart pickup changes `hearts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartPolicy {
    /// `hearts = min(hearts + 1, max_hearts)`.
    #[default]
    Clamp,
    /// `hearts = max(hearts + 1, max_hearts)`: a heart always refills, and can
    /// push past the cap once already full.
    LegacyMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Horizontal speed in units/frame while a move command is held.
    pub speed: f32,
    /// Initial upward speed of a jump in units/frame.
    pub jump_power: f32,
    pub lives: u32,
    pub max_hearts: u32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_power: 20.0,
            lives: 3,
            max_hearts: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub frame_rate: u32,
    /// World units per level grid cell. Every entity is one cell square.
    pub grid_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Enemies farther than `enemy_cull_factor * viewport_width` from the
    /// character are frozen for the frame.
    pub enemy_cull_factor: f32,
    pub invincibility_seconds: f32,
    pub enemy_speed: f32,
    pub coin_value: u32,
    pub heart_policy: HeartPolicy,
    pub character: CharacterConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            grid_size: 64.0,
            viewport_width: 960.0,
            viewport_height: 640.0,
            enemy_cull_factor: 2.0,
            invincibility_seconds: 0.75,
            enemy_speed: 2.0,
            coin_value: 1,
            heart_policy: HeartPolicy::Clamp,
            character: CharacterConfig::default(),
        }
    }
}

impl SimConfig {
    /// Frames of invincibility granted after a hit.
    pub fn invincibility_frames(&self) -> u32 {
        (self.invincibility_seconds * self.frame_rate as f32) as u32
    }

    pub fn enemy_cull_distance(&self) -> f32 {
        self.enemy_cull_factor * self.viewport_width
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.frame_rate == 0 {
            return Err("Config validation failed: frame_rate must be > 0".to_string());
        }
        let positive = [
            ("grid_size", self.grid_size),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("enemy_cull_factor", self.enemy_cull_factor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "Config validation failed: {name} must be a finite value > 0 (got {value})"
                ));
            }
        }
        let non_negative = [
            ("invincibility_seconds", self.invincibility_seconds),
            ("enemy_speed", self.enemy_speed),
            ("character.speed", self.character.speed),
            ("character.jump_power", self.character.jump_power),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "Config validation failed: {name} must be a finite value >= 0 (got {value})"
                ));
            }
        }
        if self.character.max_hearts == 0 {
            return Err("Config validation failed: character.max_hearts must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let config = SimConfig::default();
        assert_eq!(config.invincibility_frames(), 45);
        assert_eq!(config.enemy_cull_distance(), 1920.0);
        assert_eq!(config.character.speed, 5.0);
        assert_eq!(config.character.jump_power, 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SimConfig = serde_json::from_str(
            r#"{ "frame_rate": 30, "heart_policy": "legacy_max", "character": { "lives": 5 } }"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.heart_policy, HeartPolicy::LegacyMax);
        assert_eq!(config.character.lives, 5);
        assert_eq!(config.character.max_hearts, 3);
        assert_eq!(config.grid_size, 64.0);
        assert_eq!(config.invincibility_frames(), 22);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_rate = SimConfig {
            frame_rate: 0,
            ..SimConfig::default()
        };
        assert!(zero_rate.validate().unwrap_err().contains("frame_rate"));

        let nan_grid = SimConfig {
            grid_size: f32::NAN,
            ..SimConfig::default()
        };
        assert!(nan_grid.validate().unwrap_err().contains("grid_size"));

        let mut no_hearts = SimConfig::default();
        no_hearts.character.max_hearts = 0;
        assert!(no_hearts.validate().unwrap_err().contains("max_hearts"));
    }
}
