//! Backend-independent draw commands
//!
//! All coordinates are world pixels (tile units times `TILE_SIZE`), origin
//! top-left, y down. The painter maps them through a `Viewport`.

use glam::Vec2;
use townsfolk_core::Color;

/// One primitive to paint, in painter's order
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
    /// Left-aligned text whose baseline starts at `pos`
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
    },
    /// Text centred on `center_x` on a translucent plate whose bottom edge
    /// sits at `bottom`. The painter measures the text to size the plate.
    NameTag {
        center_x: f32,
        bottom: f32,
        text: String,
        size: f32,
    },
    /// White rounded box with a tail pointing down at `tail`
    SpeechBubble {
        tail: Vec2,
        text: String,
        size: f32,
    },
    /// Fill over the whole canvas
    ScreenTint { color: Color },
}

/// A complete frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.push(Shape::Rect { min, size, color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.push(Shape::Ellipse {
            center,
            radii,
            color,
        });
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

/// Convex outline approximating an ellipse, for painters without a native one
pub fn ellipse_points(center: Vec2, radii: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos() * radii.x, angle.sin() * radii.y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_points_lie_on_ellipse() {
        let center = Vec2::new(16.0, 30.0);
        let radii = Vec2::new(10.0, 5.0);
        let points = ellipse_points(center, radii, 24);
        assert_eq!(points.len(), 24);
        for p in points {
            let d = (p - center) / radii;
            assert!((d.length_squared() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_draw_list_preserves_order() {
        let mut list = DrawList::new();
        list.rect(Vec2::ZERO, Vec2::ONE, Color::BLACK);
        list.circle(Vec2::ZERO, 1.0, Color::WHITE);
        assert_eq!(list.len(), 2);
        assert!(matches!(list.shapes()[0], Shape::Rect { .. }));
        assert!(matches!(list.shapes()[1], Shape::Circle { .. }));
    }
}
