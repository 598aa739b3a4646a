//! Collision resolver: moves a rectangle against the static block set.
//!
//! The core algorithm is **axis-separated move-and-clip**: apply the horizontal
//! displacement and clip against every overlapping block, then apply the
//! vertical displacement from the already-corrected X position and clip again.
//! Resolving one axis at a time means a contact is always unambiguously a wall,
//! a floor or a ceiling, and a diagonal step can never tunnel through a corner.
//!
//! The vertical pass always adds a one-unit downward probe. A body resting
//! exactly on a block with `vy == 0` would otherwise never overlap it and would
//! never be reported as landed.

use glam::Vec2;

use crate::body::KinematicBody;
use crate::entity::Block;
use crate::geometry::Rect;

/// Downward nudge used by the vertical pass and by the jump probe.
pub const GROUND_PROBE: f32 = 1.0;

/// Horizontal extent covered by the blocks a body landed on this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportSpan {
    pub left: f32,
    pub right: f32,
}

impl SupportSpan {
    fn include(span: Option<Self>, block: &Rect) -> Self {
        match span {
            Some(span) => Self {
                left: span.left.min(block.left()),
                right: span.right.max(block.right()),
            },
            None => Self {
                left: block.left(),
                right: block.right(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionMoveResult {
    pub rect: Rect,
    pub blocked_left: bool,
    pub blocked_right: bool,
    pub landed: bool,
    pub bumped_head: bool,
    pub support: Option<SupportSpan>,
}

impl CollisionMoveResult {
    pub fn blocked_horizontally(&self) -> bool {
        self.blocked_left || self.blocked_right
    }

    /// True when the edge facing `vx` now hangs past the blocks the body landed on.
    ///
    /// Always false for an airborne body or one with no horizontal motion.
    pub fn leading_edge_overhangs(&self, vx: f32) -> bool {
        let Some(span) = self.support else {
            return false;
        };
        if vx > 0.0 {
            self.rect.right() > span.right
        } else if vx < 0.0 {
            self.rect.left() < span.left
        } else {
            false
        }
    }
}

/// Move `rect` by `velocity` and clip it against `blocks`. Pure: velocities are
/// left to the caller, which decides whether a wall stops it or turns it around.
///
/// When several blocks overlap on one axis the most restrictive edge wins, so
/// the outcome does not depend on block order.
pub fn resolve_move(rect: Rect, velocity: Vec2, blocks: &[Block]) -> CollisionMoveResult {
    let mut result = CollisionMoveResult {
        rect,
        blocked_left: false,
        blocked_right: false,
        landed: false,
        bumped_head: false,
        support: None,
    };

    // X pass.
    let before_x = result.rect.x;
    result.rect.x += velocity.x;
    let moved = result.rect;
    for block_rect in blocks.iter().map(Block::rect).filter(|b| moved.intersects(b)) {
        if velocity.x > 0.0 {
            result.rect.x = result.rect.x.min(block_rect.left() - rect.width);
            result.blocked_right = true;
        } else if velocity.x < 0.0 {
            result.rect.x = result.rect.x.max(block_rect.right());
            result.blocked_left = true;
        }
    }
    // Guardrail: clipping never pushes against the direction of travel.
    if velocity.x > 0.0 {
        result.rect.x = result.rect.x.max(before_x);
    } else if velocity.x < 0.0 {
        result.rect.x = result.rect.x.min(before_x);
    }

    // Y pass, from the corrected X position. Direction is taken from the net
    // displacement so a slow upward drift cancelled by the probe still lands.
    let dy = velocity.y + GROUND_PROBE;
    let before_y = result.rect.y;
    result.rect.y += dy;
    let moved = result.rect;
    let mut floor_top = f32::INFINITY;
    for block_rect in blocks.iter().map(Block::rect).filter(|b| moved.intersects(b)) {
        if dy >= 0.0 {
            floor_top = floor_top.min(block_rect.top());
            result.landed = true;
        } else {
            result.rect.y = result.rect.y.max(block_rect.bottom());
            result.bumped_head = true;
        }
    }

    if result.landed {
        result.rect.y = (floor_top - rect.height).max(before_y);
        for block_rect in blocks
            .iter()
            .map(Block::rect)
            .filter(|b| moved.intersects(b) && b.top() == floor_top)
        {
            result.support = Some(SupportSpan::include(result.support, block_rect));
        }
    } else if result.bumped_head {
        result.rect.y = result.rect.y.min(before_y);
    }

    result
}

/// Speculative probe: would `rect` touch a block if nudged down by one unit?
/// Nothing is moved.
pub fn is_supported(rect: &Rect, blocks: &[Block]) -> bool {
    let probe = rect.translated(0.0, GROUND_PROBE);
    blocks.iter().any(|block| probe.intersects(block.rect()))
}

impl KinematicBody {
    /// Resolve this body's velocity against `blocks`, committing the corrected
    /// rectangle and zeroing `vy` on any vertical contact. `vx` is left alone so
    /// callers can stop or reverse.
    pub fn move_and_collide(&mut self, blocks: &[Block]) -> CollisionMoveResult {
        let result = resolve_move(self.rect, self.velocity, blocks);
        self.rect = result.rect;
        if result.landed || result.bumped_head {
            self.velocity.y = 0.0;
        }
        result
    }
}
