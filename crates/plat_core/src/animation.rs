//! Presentational animation state driven by the simulation.
//!
//! Nothing here feeds back into physics. Frame selection uses integer step
//! counters only, so it advances identically on every platform under the
//! fixed-frame model.

use crate::body::Direction;

/// Enemies hold each animation frame for this many steps.
pub const ENEMY_FRAME_STEPS: u32 = 20;

/// Frames in the character's run cycle.
pub const RUN_FRAME_COUNT: usize = 2;

/// Cycles a frame index through `frame_count` frames, moving on every `period` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCycle {
    period: u32,
    frame_count: usize,
    steps: u32,
    next: usize,
    current: usize,
}

impl FrameCycle {
    pub fn new(frame_count: usize, period: u32) -> Self {
        Self {
            period: period.max(1),
            frame_count: frame_count.max(1),
            steps: 0,
            next: 0,
            current: 0,
        }
    }

    /// Advance one step and return the frame to show.
    pub fn tick(&mut self) -> usize {
        if self.steps == 0 {
            self.current = self.next;
            self.next = (self.next + 1) % self.frame_count;
        }
        self.steps = (self.steps + 1) % self.period;
        self.current
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.steps = 0;
        self.next = 0;
        self.current = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterPose {
    Idle,
    Run { frame: usize },
    Jump,
}

/// Sprite selection for the character: pose plus the side it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterAnimator {
    run: FrameCycle,
    pose: CharacterPose,
}

impl CharacterAnimator {
    /// The run cycle advances every `steps_per_frame` steps (the character's speed).
    pub fn new(steps_per_frame: u32) -> Self {
        Self {
            run: FrameCycle::new(RUN_FRAME_COUNT, steps_per_frame),
            pose: CharacterPose::Idle,
        }
    }

    pub fn update(&mut self, on_ground: bool, vx: f32) -> CharacterPose {
        self.pose = if !on_ground {
            CharacterPose::Jump
        } else if vx != 0.0 {
            CharacterPose::Run {
                frame: self.run.tick(),
            }
        } else {
            CharacterPose::Idle
        };
        self.pose
    }

    pub fn pose(&self) -> CharacterPose {
        self.pose
    }
}

/// Frame index and facing for an enemy sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub facing: Direction,
    pub frame: usize,
}
