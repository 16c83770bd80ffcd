//! Overlay on top of the canvas

use egui::{Align2, Color32, FontId, Ui};

const HINT: &str = "WASD or Click to Move \u{2022} Proximity Chat";

pub fn hud(ui: &mut Ui, period: &str, paused: bool) {
    let rect = ui.max_rect();
    let painter = ui.painter();

    painter.text(
        rect.center_top() + egui::vec2(0.0, 12.0),
        Align2::CENTER_TOP,
        format!("{}  |  {}", HINT, period),
        FontId::monospace(11.0),
        Color32::from_white_alpha(200),
    );

    if paused {
        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(140));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "PAUSED",
            FontId::proportional(48.0),
            Color32::from_rgb(200, 200, 255),
        );
    }
}
