//! Fitting the world canvas into the available screen area

use glam::Vec2;
use townsfolk_world::TILE_SIZE;

/// Uniform scale plus offset from world pixels to screen points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen position of the world's top-left corner
    pub origin: Vec2,
    pub scale: f32,
    /// World size in pixels
    pub world_px: Vec2,
}

impl Viewport {
    /// Largest scale that fits `world_px` into `fill` of the container on both
    /// axes, capped at `max_zoom`, centred in the container.
    pub fn fit(container_min: Vec2, container_size: Vec2, world_px: Vec2, fill: f32, max_zoom: f32) -> Self {
        let fit = container_size * fill / world_px;
        let scale = fit.x.min(fit.y).min(max_zoom).max(f32::EPSILON);
        let origin = container_min + (container_size - world_px * scale) * 0.5;
        Self {
            origin,
            scale,
            world_px,
        }
    }

    /// World pixels to screen points
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        self.origin + world * self.scale
    }

    /// Screen points to world pixels
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.origin) / self.scale
    }

    /// Screen points to world tile coordinates
    pub fn to_tile(&self, screen: Vec2) -> Vec2 {
        self.to_world(screen) / TILE_SIZE
    }

    /// Canvas size on screen
    pub fn screen_size(&self) -> Vec2 {
        self.world_px * self.scale
    }

    pub fn contains_screen(&self, screen: Vec2) -> bool {
        let world = self.to_world(screen);
        world.cmpge(Vec2::ZERO).all() && world.cmple(self.world_px).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(1280.0, 960.0);

    #[test]
    fn test_fit_is_capped_at_max_zoom() {
        let vp = Viewport::fit(Vec2::ZERO, Vec2::new(4000.0, 4000.0), WORLD, 0.95, 1.2);
        assert_eq!(vp.scale, 1.2);
    }

    #[test]
    fn test_fit_uses_tighter_axis() {
        let vp = Viewport::fit(Vec2::ZERO, Vec2::new(1000.0, 2000.0), WORLD, 0.95, 1.2);
        assert!((vp.scale - 1000.0 * 0.95 / 1280.0).abs() < 1e-6);
        // Centred on both axes
        let size = vp.screen_size();
        assert!((vp.origin.x - (1000.0 - size.x) / 2.0).abs() < 1e-3);
        assert!((vp.origin.y - (2000.0 - size.y) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_to_tile_inverts_mapping() {
        let vp = Viewport::fit(Vec2::new(200.0, 40.0), Vec2::new(900.0, 700.0), WORLD, 0.95, 1.2);
        let tile = Vec2::new(12.5, 7.25);
        let screen = vp.to_screen(tile * TILE_SIZE);
        let back = vp.to_tile(screen);
        assert!((back - tile).length() < 1e-3);
        assert!(vp.contains_screen(screen));
        assert!(!vp.contains_screen(vp.origin - Vec2::ONE));
    }
}
