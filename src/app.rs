//! Frame loop: input, simulation, composition and painting

use egui::Event;
use tracing::{debug, info};

use townsfolk_core::{FrameClock, TimeConfig};
use townsfolk_game::{InputAction, InputHandler, Simulation};
use townsfolk_render::FrameRenderer;

use crate::settings::GameSettings;
use crate::ui::{self, ChatPanel};

pub struct TownApp {
    settings: GameSettings,
    simulation: Simulation,
    renderer: FrameRenderer,
    clock: FrameClock,
    input: InputHandler,
    chat: ChatPanel,
    canvas_scale: f32,
}

impl TownApp {
    pub fn new(settings: GameSettings, simulation: Simulation, renderer: FrameRenderer) -> Self {
        Self {
            settings,
            simulation,
            renderer,
            clock: FrameClock::new(TimeConfig::default()),
            input: InputHandler::new(),
            chat: ChatPanel::new(),
            canvas_scale: 0.0,
        }
    }

    /// Feed this frame's key events into the input handler. Keys typed into
    /// a text field never move the player.
    fn collect_input(&mut self, ctx: &egui::Context) {
        let (events, focused) = ctx.input(|i| (i.events.clone(), i.focused));
        if ctx.wants_keyboard_input() || !focused {
            self.input.release_all();
            return;
        }

        for event in events {
            if let Event::Key {
                key,
                pressed,
                repeat: false,
                ..
            } = event
            {
                self.input.handle_key(key, pressed);
            }
        }
    }
}

impl eframe::App for TownApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_input(ctx);

        if self.input.state.is_just_pressed(InputAction::Pause) {
            self.clock.toggle_pause();
            info!("{}", if self.clock.paused { "Paused" } else { "Resumed" });
        }

        let raw_delta_ms = ctx.input(|i| i.stable_dt) * 1000.0;
        self.clock.update(raw_delta_ms);
        if !self.clock.paused {
            self.simulation.tick(&self.input.state);
            self.renderer.advance();
        }
        self.input.end_frame();

        let entities = self.simulation.entities();
        let elapsed_ms = self.clock.elapsed_ms_f32();

        egui::SidePanel::left("chat")
            .resizable(false)
            .exact_width(300.0)
            .show(ctx, |ui| {
                if let Some((target, text)) =
                    self.chat
                        .show(ui, &entities, self.simulation.chat_log(), self.simulation.is_busy())
                {
                    ui::send_directive(&mut self.simulation, target, &text);
                }
            });

        egui::SidePanel::right("roster")
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| {
                ui::roster_panel(ui, &entities, self.simulation.speaking(), self.simulation.is_online());
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let list = self
                    .renderer
                    .build(&entities, self.simulation.traces(), elapsed_ms);
                let world_px = self.renderer.layout().bounds.pixel_size();
                let canvas = ui::canvas(ui, &list, world_px, &self.settings.video);
                if canvas.viewport.scale != self.canvas_scale {
                    debug!("Canvas scale {:.3}", canvas.viewport.scale);
                    self.canvas_scale = canvas.viewport.scale;
                }
                if let Some(tile) = canvas.pressed_tile {
                    self.simulation.move_player_to(tile);
                }
                ui::hud(ui, self.renderer.day().period_name(elapsed_ms), self.clock.paused);
            });

        ctx.request_repaint();
    }
}
