//! Horizontal scrolling camera.

use glam::Vec2;
use plat_core::Rect;

/// Draw offsets for each layer; parallax layers scroll slower than the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOffsets {
    pub background: Vec2,
    pub scenery: Vec2,
    pub world: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    /// World-space window the viewport shows: centered on `focus`, kept inside
    /// `[0, level_width]`. A level narrower than the viewport is pinned to its left edge.
    pub fn view(&self, focus: &Rect, level_width: f32) -> Rect {
        if level_width <= self.viewport_width {
            return Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height);
        }
        let centered = Rect::new(
            focus.center_x() - self.viewport_width * 0.5,
            0.0,
            self.viewport_width,
            self.viewport_height,
        );
        centered.clamp_to(&Rect::new(0.0, 0.0, level_width, self.viewport_height))
    }

    /// Translation to apply when drawing world-space content.
    pub fn offset(&self, focus: &Rect, level_width: f32) -> Vec2 {
        Vec2::new(-self.view(focus, level_width).x, 0.0)
    }

    pub fn layer_offsets(&self, focus: &Rect, level_width: f32) -> LayerOffsets {
        let world = self.offset(focus, level_width);
        LayerOffsets {
            background: Vec2::new(world.x / 3.0, world.y),
            scenery: Vec2::new(world.x / 2.0, world.y),
            world,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_WIDTH: f32 = 3200.0;

    fn hero_at(center_x: f32) -> Rect {
        Rect::square(center_x - 32.0, 400.0, 64.0)
    }

    #[test]
    fn offset_centers_hero_mid_level() {
        let camera = Camera::new(960.0, 640.0);
        assert_eq!(camera.offset(&hero_at(1600.0), LEVEL_WIDTH), Vec2::new(-1120.0, 0.0));
    }

    #[test]
    fn offset_is_clamped_at_both_ends() {
        let camera = Camera::new(960.0, 640.0);
        assert_eq!(camera.offset(&hero_at(100.0), LEVEL_WIDTH).x, 0.0);
        assert_eq!(camera.offset(&hero_at(3150.0), LEVEL_WIDTH).x, -(LEVEL_WIDTH - 960.0));
    }

    #[test]
    fn narrow_level_never_scrolls() {
        let camera = Camera::new(960.0, 640.0);
        assert_eq!(camera.offset(&hero_at(700.0), 640.0).x, 0.0);
    }

    #[test]
    fn parallax_layers_scroll_slower() {
        let camera = Camera::new(960.0, 640.0);
        let layers = camera.layer_offsets(&hero_at(1600.0), LEVEL_WIDTH);
        assert_eq!(layers.world.x, -1120.0);
        assert_eq!(layers.scenery.x, -560.0);
        assert!((layers.background.x - (-1120.0 / 3.0)).abs() < 1e-3);
    }
}
