//! Who is in town

use egui::{Color32, RichText, Sense, Ui};

use townsfolk_core::EntityId;
use townsfolk_game::Entity;

use super::color32;

pub fn roster_panel(ui: &mut Ui, entities: &[Entity], speaking: Option<EntityId>, online: bool) {
    ui.heading("Citizens");
    let (status, color) = if online {
        ("dialogue online", Color32::from_rgb(52, 211, 153))
    } else {
        ("dialogue idle", Color32::GRAY)
    };
    ui.label(RichText::new(status).small().color(color));
    ui.separator();

    for entity in entities {
        ui.horizontal(|ui| {
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, color32(entity.color));

            let mut name = RichText::new(&entity.name);
            if entity.is_player {
                name = name.strong();
            }
            ui.label(name);
            ui.label(
                RichText::new(format!("({:.0}, {:.0})", entity.pos.x, entity.pos.y))
                    .small()
                    .weak(),
            );
            if speaking == Some(entity.id) {
                ui.label(RichText::new("...").color(Color32::YELLOW));
            } else if entity.visible_bubble().is_some() {
                ui.label(RichText::new("says").small().color(Color32::LIGHT_BLUE));
            }
        });
    }
}
