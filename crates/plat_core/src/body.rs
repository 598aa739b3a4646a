//! Kinematic base shared by every simulated entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Horizontal facing / travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    /// Direction implied by a horizontal velocity. Zero counts as `Right`.
    pub fn from_velocity(vx: f32) -> Self {
        if vx < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Position rectangle plus per-frame velocity in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicBody {
    pub rect: Rect,
    pub velocity: Vec2,
}

impl KinematicBody {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_velocity(rect: Rect, velocity: Vec2) -> Self {
        Self { rect, velocity }
    }

    /// `vy = min(vy + gravity, terminal_velocity)`.
    pub fn apply_gravity(&mut self, gravity: f32, terminal_velocity: f32) {
        self.velocity.y = (self.velocity.y + gravity).min(terminal_velocity);
    }
}
