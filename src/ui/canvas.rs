//! Paints a `DrawList` into the central panel

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui};
use townsfolk_render::{ellipse_points, DrawList, Shape, Viewport};

use super::color32;
use crate::settings::VideoSettings;

const BACKGROUND: Color32 = Color32::from_rgb(13, 13, 18);
const FRAME_WIDTH: f32 = 8.0;
const ELLIPSE_SEGMENTS: usize = 24;

fn pos2(v: glam::Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn vec2(p: Pos2) -> glam::Vec2 {
    glam::Vec2::new(p.x, p.y)
}

/// What happened on the canvas this frame
pub struct CanvasResponse {
    pub viewport: Viewport,
    /// Tile the player pressed on, if any
    pub pressed_tile: Option<glam::Vec2>,
}

/// Fill the available area with the town
pub fn canvas(ui: &mut Ui, list: &DrawList, world_px: glam::Vec2, video: &VideoSettings) -> CanvasResponse {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
    let viewport = Viewport::fit(
        vec2(rect.min),
        vec2(rect.max) - vec2(rect.min),
        world_px,
        video.fill_ratio,
        video.max_zoom,
    );

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let world_rect = Rect::from_min_size(pos2(viewport.origin), egui::vec2(viewport.screen_size().x, viewport.screen_size().y));
    painter.rect_filled(
        world_rect.expand(FRAME_WIDTH),
        2.0,
        Color32::from_black_alpha(153),
    );

    let world_painter = painter.with_clip_rect(world_rect);
    for shape in list {
        paint_shape(&world_painter, &viewport, world_rect, shape);
    }

    let pressed = ui.input(|i| {
        if i.pointer.primary_pressed() {
            i.pointer.interact_pos()
        } else {
            None
        }
    });
    let pressed_tile = pressed
        .filter(|_| response.hovered())
        .map(vec2)
        .filter(|p| viewport.contains_screen(*p))
        .map(|p| viewport.to_tile(p));

    CanvasResponse {
        viewport,
        pressed_tile,
    }
}

fn paint_shape(painter: &Painter, viewport: &Viewport, world_rect: Rect, shape: &Shape) {
    let scale = viewport.scale;
    let at = |v: glam::Vec2| pos2(viewport.to_screen(v));

    match shape {
        Shape::Rect { min, size, color } => {
            let rect = Rect::from_min_size(at(*min), egui::vec2(size.x * scale, size.y * scale));
            painter.rect_filled(rect, 0.0, color32(*color));
        }
        Shape::Circle {
            center,
            radius,
            color,
        } => {
            painter.circle_filled(at(*center), radius * scale, color32(*color));
        }
        Shape::Ellipse {
            center,
            radii,
            color,
        } => {
            let points = ellipse_points(*center, *radii, ELLIPSE_SEGMENTS)
                .into_iter()
                .map(at)
                .collect();
            painter.add(egui::Shape::convex_polygon(points, color32(*color), Stroke::NONE));
        }
        Shape::Triangle { points, color } => {
            let points = points.iter().map(|p| at(*p)).collect();
            painter.add(egui::Shape::convex_polygon(points, color32(*color), Stroke::NONE));
        }
        Shape::Text {
            pos,
            text,
            size,
            color,
        } => {
            painter.text(
                at(*pos),
                Align2::LEFT_BOTTOM,
                text,
                FontId::monospace(size * scale),
                color32(*color),
            );
        }
        Shape::NameTag {
            center_x,
            bottom,
            text,
            size,
        } => {
            let galley = painter.layout_no_wrap(text.clone(), FontId::monospace(size * scale), Color32::WHITE);
            let text_size = galley.size();
            let anchor = at(glam::Vec2::new(*center_x, *bottom));
            let plate = Rect::from_min_max(
                Pos2::new(anchor.x - text_size.x / 2.0 - 4.0 * scale, anchor.y - 10.0 * scale),
                Pos2::new(anchor.x + text_size.x / 2.0 + 4.0 * scale, anchor.y),
            );
            painter.rect_filled(plate, 0.0, Color32::from_black_alpha(128));
            painter.galley(plate.center() - text_size / 2.0, galley, Color32::WHITE);
        }
        Shape::SpeechBubble { tail, text, size } => {
            let galley = painter.layout_no_wrap(text.clone(), FontId::monospace(size * scale), Color32::BLACK);
            let text_size = galley.size();
            let tip = at(*tail);
            let box_bottom = tip.y - 6.0 * scale;
            let bubble = Rect::from_min_max(
                Pos2::new(tip.x - text_size.x / 2.0 - 8.0 * scale, box_bottom - 24.0 * scale),
                Pos2::new(tip.x + text_size.x / 2.0 + 8.0 * scale, box_bottom),
            );
            painter.rect_filled(bubble, 4.0 * scale, Color32::WHITE);
            painter.add(egui::Shape::convex_polygon(
                vec![
                    Pos2::new(tip.x - 4.0 * scale, box_bottom),
                    Pos2::new(tip.x + 4.0 * scale, box_bottom),
                    tip,
                ],
                Color32::WHITE,
                Stroke::NONE,
            ));
            painter.galley(bubble.center() - text_size / 2.0, galley, Color32::BLACK);
        }
        Shape::ScreenTint { color } => {
            painter.rect_filled(world_rect, 0.0, color32(*color));
        }
    }
}
