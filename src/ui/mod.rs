//! UI module for Townsfolk
//!
//! egui panels around the town canvas.

mod canvas;
mod chat_panel;
mod hud;
mod roster_panel;

pub use canvas::canvas;
pub use chat_panel::{send_directive, ChatPanel};
pub use hud::hud;
pub use roster_panel::roster_panel;

use egui::Color32;
use townsfolk_core::Color;

/// Convert an engine color to egui's
pub fn color32(color: Color) -> Color32 {
    let [r, g, b, a] = color.to_rgba8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
