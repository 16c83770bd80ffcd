//! Transcript and directive input

use egui::{Color32, RichText, ScrollArea, TextEdit, Ui};
use tracing::warn;

use townsfolk_core::EntityId;
use townsfolk_game::{ChatLog, Entity, Simulation, PLAYER_SENDER};

/// Left-hand panel state
#[derive(Default)]
pub struct ChatPanel {
    selected: Option<EntityId>,
    draft: String,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the panel. Returns a directive when the player hits send.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        entities: &[Entity],
        log: &ChatLog,
        busy: bool,
    ) -> Option<(EntityId, String)> {
        ui.heading("Town Chat");
        ui.separator();

        let input_height = 96.0;
        ScrollArea::vertical()
            .max_height((ui.available_height() - input_height).max(0.0))
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for message in log.iter() {
                    let sender_color = if message.sender == PLAYER_SENDER {
                        Color32::from_rgb(96, 165, 250)
                    } else {
                        Color32::from_rgb(52, 211, 153)
                    };
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(format!("{}:", message.sender)).strong().color(sender_color));
                        ui.label(message.text.as_str());
                    });
                }
                if busy {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("processing...").italics().weak());
                    });
                }
            });

        ui.separator();

        // Keep the selection valid; default to the first NPC
        let npcs: Vec<&Entity> = entities.iter().filter(|e| !e.is_player).collect();
        if !npcs.iter().any(|e| Some(e.id) == self.selected) {
            self.selected = npcs.first().map(|e| e.id);
        }
        let selected_name = npcs
            .iter()
            .find(|e| Some(e.id) == self.selected)
            .map(|e| e.name.as_str())
            .unwrap_or("-");

        egui::ComboBox::from_id_salt("directive_target")
            .selected_text(selected_name)
            .show_ui(ui, |ui| {
                for npc in &npcs {
                    ui.selectable_value(&mut self.selected, Some(npc.id), npc.name.as_str());
                }
            });

        let mut submit = false;
        ui.horizontal(|ui| {
            let response = ui.add_enabled(
                !busy,
                TextEdit::singleline(&mut self.draft)
                    .hint_text("Say something...")
                    .desired_width(ui.available_width() - 56.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            let can_send = !busy && self.selected.is_some() && !self.draft.trim().is_empty();
            if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                submit = true;
            }
        });

        if !submit || busy {
            return None;
        }
        let target = self.selected?;
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.draft.clear();
        Some((target, text))
    }
}

/// Route a directive into the simulation, logging rejected ones
pub fn send_directive(simulation: &mut Simulation, target: EntityId, text: &str) {
    match simulation.send_message(target, text) {
        Ok(true) => {}
        Ok(false) => warn!("Dialogue busy, {} will not answer", target),
        Err(e) => warn!("Directive rejected: {}", e),
    }
}
