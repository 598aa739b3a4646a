//! Patrolling enemies.
//!
//! Both variants are always moving, either left or right. `reverse()` is the only
//! transition and is triggered by a world edge, a wall, or (ledge-aware only)
//! landing in a spot where the leading edge hangs past the ground underneath.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::{FrameCycle, SpriteFrame, ENEMY_FRAME_STEPS};
use crate::body::{Direction, KinematicBody};
use crate::collision::CollisionMoveResult;
use crate::entity::Block;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Walks off ledges; only walls and world edges turn it around.
    GroundPatrol,
    /// Turns back at the edge of the platform it stands on.
    LedgeAware,
}

impl EnemyKind {
    pub fn frame_count(self) -> usize {
        match self {
            EnemyKind::GroundPatrol => 1,
            EnemyKind::LedgeAware => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnemyKind::GroundPatrol => "ground-patrol",
            EnemyKind::LedgeAware => "ledge-aware",
        }
    }
}

/// Read-only level data an enemy needs for one update.
#[derive(Debug, Clone, Copy)]
pub struct PatrolContext<'a> {
    pub blocks: &'a [Block],
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub level_width: f32,
    pub hero: &'a Rect,
    pub cull_distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: KinematicBody,
    pub direction: Direction,
    start_position: Vec2,
    start_velocity: Vec2,
    animation: FrameCycle,
}

impl Enemy {
    /// Spawn at `rect`, walking left at `speed`.
    pub fn new(kind: EnemyKind, rect: Rect, speed: f32) -> Self {
        let start_velocity = Vec2::new(-speed, 0.0);
        Self {
            kind,
            body: KinematicBody::with_velocity(rect, start_velocity),
            direction: Direction::Left,
            start_position: rect.position(),
            start_velocity,
            animation: FrameCycle::new(kind.frame_count(), ENEMY_FRAME_STEPS),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn start_velocity(&self) -> Vec2 {
        self.start_velocity
    }

    pub fn animation_index(&self) -> usize {
        self.animation.current()
    }

    pub fn sprite_frame(&self) -> SpriteFrame {
        SpriteFrame {
            facing: self.direction,
            frame: self.animation.current(),
        }
    }

    /// Flip horizontal velocity and mirror the sprite set.
    pub fn reverse(&mut self) {
        self.body.velocity.x = -self.body.velocity.x;
        self.direction = Direction::from_velocity(self.body.velocity.x);
        log::trace!(
            "{} enemy at ({:.0}, {:.0}) reversed to {:?}",
            self.kind.label(),
            self.body.rect.x,
            self.body.rect.y,
            self.direction
        );
    }

    /// Within simulation range of the character on the x axis.
    pub fn is_near(&self, hero: &Rect, cull_distance: f32) -> bool {
        (self.body.rect.x - hero.x).abs() < cull_distance
    }

    /// Advance one frame. Returns false when the enemy was culled and left frozen.
    pub fn update(&mut self, ctx: &PatrolContext<'_>) -> bool {
        if !self.is_near(ctx.hero, ctx.cull_distance) {
            return false;
        }

        self.body.apply_gravity(ctx.gravity, ctx.terminal_velocity);
        let result = self.body.move_and_collide(ctx.blocks);
        self.react_to_collision(&result);
        self.check_world_boundaries(ctx.level_width);
        self.animation.tick();
        true
    }

    fn react_to_collision(&mut self, result: &CollisionMoveResult) {
        if result.blocked_horizontally() {
            self.reverse();
        }
        if self.kind == EnemyKind::LedgeAware
            && result.landed
            && result.leading_edge_overhangs(self.body.velocity.x)
        {
            self.reverse();
        }
    }

    fn check_world_boundaries(&mut self, level_width: f32) {
        let vx = self.body.velocity.x;
        if self.body.rect.left() <= 0.0 && vx < 0.0 {
            self.body.rect.set_left(0.0);
            self.reverse();
        } else if self.body.rect.right() >= level_width && vx > 0.0 {
            self.body.rect.set_right(level_width);
            self.reverse();
        }
    }

    /// Restore spawn position and velocity, facing left, first animation frame.
    pub fn reset(&mut self) {
        self.body.rect.set_position(self.start_position);
        self.body.velocity = self.start_velocity;
        self.direction = Direction::Left;
        self.animation.reset();
    }
}
