//! The player character: command-driven movement plus heart/life bookkeeping.
//!
//! `update()` runs a fixed sequence each frame and the order is load-bearing,
//! since it decides precedence when several things happen at once:
//!
//!   1. enemy contact (costs a heart unless invincible)
//!   2. gravity
//!   3. move and clip against blocks, refresh `on_ground`
//!   4. clamp to the horizontal world bounds
//!   5. pick the presentational pose
//!   6. with hearts left: coins, power-ups, flag, invincibility countdown
//!   7. with no hearts left: spend a life (once per depletion)
//!
//! Movement commands are level-triggered: the driver calls exactly one of
//! `move_left` / `move_right` / `stop` per frame. `jump` is an edge-triggered
//! command gated by a speculative ground probe rather than by `on_ground`, so it
//! registers on the very frame contact begins.

use glam::Vec2;

use crate::animation::{CharacterAnimator, CharacterPose};
use crate::body::{Direction, KinematicBody};
use crate::collision;
use crate::config::{HeartPolicy, SimConfig};
use crate::entity::{take_overlapping, Block, PickupEffect};
use crate::events::FrameEvent;
use crate::geometry::Rect;
use crate::level::Level;

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub body: KinematicBody,
    pub speed: f32,
    pub jump_power: f32,
    pub facing: Direction,
    pub on_ground: bool,
    pub score: u32,
    pub lives: u32,
    pub hearts: u32,
    pub max_hearts: u32,
    /// Frames of damage immunity remaining.
    pub invincibility_timer: u32,
    invincibility_frames: u32,
    heart_policy: HeartPolicy,
    /// Set when a life has been spent for the current depletion; cleared by `respawn`.
    life_spent: bool,
    animator: CharacterAnimator,
}

impl Character {
    pub fn new(config: &SimConfig) -> Self {
        let tuning = config.character;
        Self {
            body: KinematicBody::new(Rect::square(0.0, 0.0, config.grid_size)),
            speed: tuning.speed,
            jump_power: tuning.jump_power,
            facing: Direction::Right,
            on_ground: true,
            score: 0,
            lives: tuning.lives,
            hearts: tuning.max_hearts,
            max_hearts: tuning.max_hearts,
            invincibility_timer: 0,
            invincibility_frames: config.invincibility_frames(),
            heart_policy: config.heart_policy,
            life_spent: false,
            animator: CharacterAnimator::new(tuning.speed.max(1.0) as u32),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn heart_policy(&self) -> HeartPolicy {
        self.heart_policy
    }

    pub fn pose(&self) -> CharacterPose {
        self.animator.pose()
    }

    /// Blink while invincible: drawn on two frames out of every three.
    pub fn is_visible(&self) -> bool {
        self.invincibility_timer % 3 < 2
    }

    pub fn move_left(&mut self) {
        self.body.velocity.x = -self.speed;
        self.facing = Direction::Left;
    }

    pub fn move_right(&mut self) {
        self.body.velocity.x = self.speed;
        self.facing = Direction::Right;
    }

    pub fn stop(&mut self) {
        self.body.velocity.x = 0.0;
    }

    /// Jump if a block lies within one unit below. Returns whether the jump fired.
    pub fn jump(&mut self, blocks: &[Block]) -> bool {
        if collision::is_supported(&self.body.rect, blocks) {
            self.body.velocity.y = -self.jump_power;
            true
        } else {
            false
        }
    }

    /// Put the character back at the level start with full hearts. Score and
    /// lives carry over.
    pub fn respawn(&mut self, level: &Level) {
        self.respawn_at(level.start_position);
    }

    pub fn respawn_at(&mut self, start: Vec2) {
        self.body.rect.set_position(start);
        self.hearts = self.max_hearts;
        self.invincibility_timer = 0;
        self.facing = Direction::Right;
        self.life_spent = false;
        log::info!(
            "Hero respawned at ({}, {}) with {} lives",
            start.x,
            start.y,
            self.lives
        );
    }

    /// Run one frame against `level`, appending outcomes to `events`.
    pub fn update(&mut self, level: &mut Level, events: &mut Vec<FrameEvent>) {
        self.process_enemies(level, events);
        self.body.apply_gravity(level.gravity, level.terminal_velocity);
        let result = self.body.move_and_collide(&level.blocks);
        if result.blocked_horizontally() {
            self.body.velocity.x = 0.0;
        }
        self.on_ground = result.landed;
        self.check_world_boundaries(level.width);
        self.animator.update(self.on_ground, self.body.velocity.x);

        if self.hearts > 0 {
            self.process_coins(level, events);
            self.process_powerups(level, events);
            self.check_flag(level, events);
            self.invincibility_timer = self.invincibility_timer.saturating_sub(1);
        } else {
            self.die(events);
        }
    }

    fn process_enemies(&mut self, level: &Level, events: &mut Vec<FrameEvent>) {
        if self.hearts == 0 || self.invincibility_timer > 0 {
            return;
        }
        let rect = self.body.rect;
        if level.enemies().iter().any(|enemy| enemy.rect().intersects(&rect)) {
            self.hearts -= 1;
            self.invincibility_timer = self.invincibility_frames;
            log::debug!("Hero hit by enemy, {} hearts left", self.hearts);
            events.push(FrameEvent::HeroHurt {
                hearts_left: self.hearts,
            });
        }
    }

    fn check_world_boundaries(&mut self, level_width: f32) {
        if self.body.rect.left() < 0.0 {
            self.body.rect.set_left(0.0);
        } else if self.body.rect.right() > level_width {
            self.body.rect.set_right(level_width);
        }
    }

    fn process_coins(&mut self, level: &mut Level, events: &mut Vec<FrameEvent>) {
        for coin in take_overlapping(&mut level.coins, &self.body.rect) {
            coin.effect.apply(self);
            if let PickupEffect::Coin { value } = coin.effect {
                log::trace!("Coin collected (+{value}), score {}", self.score);
                events.push(FrameEvent::CoinCollected { value });
            }
        }
    }

    fn process_powerups(&mut self, level: &mut Level, events: &mut Vec<FrameEvent>) {
        for powerup in take_overlapping(&mut level.powerups, &self.body.rect) {
            powerup.effect.apply(self);
            log::debug!(
                "Power-up {:?} applied: hearts {}, lives {}",
                powerup.effect,
                self.hearts,
                self.lives
            );
            events.push(FrameEvent::PowerUpCollected(powerup.effect));
        }
    }

    fn check_flag(&self, level: &mut Level, events: &mut Vec<FrameEvent>) {
        if level.completed {
            return;
        }
        if level.flag.iter().any(|flag| flag.rect().intersects(&self.body.rect)) {
            level.completed = true;
            log::info!("Flag reached, level complete");
            events.push(FrameEvent::FlagReached);
        }
    }

    fn die(&mut self, events: &mut Vec<FrameEvent>) {
        if self.life_spent {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.life_spent = true;
        log::info!("Hero out of hearts, {} lives left", self.lives);
        events.push(FrameEvent::HeroDied {
            lives_left: self.lives,
        });
    }
}
