//! Axis-aligned rectangles in world units.
//!
//! World space follows screen conventions: `x` grows to the right and `y` grows
//! downward, so `top < bottom`. Rectangles are treated as open sets for overlap
//! tests: two rectangles that merely share an edge do not intersect. This is
//! what lets a body rest exactly on a block without counting as penetration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square rectangle anchored at its top-left corner.
    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// True when every component is finite and both extents are strictly positive.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Open-interval overlap on both axes. Shared edges are not an intersection.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Move this rectangle the minimum distance needed to lie inside `bounds`.
    ///
    /// On an axis where the rectangle is larger than `bounds` it is centered on
    /// `bounds` instead.
    pub fn clamp_to(&self, bounds: &Rect) -> Rect {
        let x = clamp_axis(self.x, self.width, bounds.x, bounds.width);
        let y = clamp_axis(self.y, self.height, bounds.y, bounds.height);
        Rect::new(x, y, self.width, self.height)
    }
}

fn clamp_axis(start: f32, extent: f32, bounds_start: f32, bounds_extent: f32) -> f32 {
    if extent >= bounds_extent {
        bounds_start + (bounds_extent - extent) * 0.5
    } else if start < bounds_start {
        bounds_start
    } else if start + extent > bounds_start + bounds_extent {
        bounds_start + bounds_extent - extent
    } else {
        start
    }
}

/// Free-function form of [`Rect::intersects`].
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_derived_from_origin_and_size() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut r = Rect::square(0.0, 0.0, 64.0);
        r.set_right(100.0);
        r.set_bottom(200.0);
        assert_eq!(r, Rect::square(36.0, 136.0, 64.0));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::square(0.0, 0.0, 64.0);
        let right_neighbour = Rect::square(64.0, 0.0, 64.0);
        let below = Rect::square(0.0, 64.0, 64.0);
        assert!(!intersects(&a, &right_neighbour));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn overlap_on_both_axes_intersects() {
        let a = Rect::square(0.0, 0.0, 64.0);
        assert!(a.intersects(&Rect::square(63.0, 63.0, 64.0)));
        assert!(a.intersects(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::square(63.0, 64.0, 64.0)));
    }

    #[test]
    fn clamp_to_pulls_rect_inside_bounds() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let clamped = Rect::square(-5.0, 95.0, 10.0).clamp_to(&bounds);
        assert_eq!(clamped, Rect::square(0.0, 90.0, 10.0));

        let inside = Rect::square(20.0, 20.0, 10.0);
        assert_eq!(inside.clamp_to(&bounds), inside);
    }

    #[test]
    fn clamp_to_centers_oversized_rect() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let wide = Rect::new(500.0, 10.0, 200.0, 10.0).clamp_to(&bounds);
        assert_eq!(wide.x, -50.0);
        assert_eq!(wide.y, 10.0);
    }

    #[test]
    fn zero_or_non_finite_extent_is_not_well_formed() {
        assert!(Rect::square(0.0, 0.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 1.0, -1.0).is_well_formed());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_well_formed());
    }
}
