//! The simulation context and its command surface
//!
//! `Simulation` owns every piece of authoritative state. The UI thread calls
//! `tick` once per frame and uses the command methods in between; nothing
//! else mutates the entity store or the transcript.

use std::collections::HashMap;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use townsfolk_core::EntityId;
use townsfolk_integration::{DialogueBackend, HttpDialogueApi, IntegrationClient};
use townsfolk_world::WorldBounds;
use tracing::{debug, info};

use crate::chat_log::{ChatLog, ChatMessage, PLAYER_SENDER};
use crate::config::SimulationConfig;
use crate::dialogue::{DialogueDirector, DialogueKind, DialogueOutcome};
use crate::entity::{Entity, EntitySnapshot, EntityStore};
use crate::error::{CommandError, RosterError};
use crate::input::InputState;
use crate::motion::{MotionController, MotionTrace};
use crate::proximity::ProximityTrigger;

pub struct Simulation<B: DialogueBackend = HttpDialogueApi> {
    config: SimulationConfig,
    store: EntityStore,
    transcript: ChatLog,
    motion: MotionController,
    proximity: ProximityTrigger,
    dialogue: DialogueDirector<B>,
    rng: StdRng,
}

impl<B: DialogueBackend> Simulation<B> {
    /// Create a simulation over `entities` seeded from OS entropy
    pub fn new(
        config: SimulationConfig,
        entities: Vec<Entity>,
        client: IntegrationClient<B>,
    ) -> Result<Self, RosterError> {
        Self::with_rng(config, entities, client, StdRng::from_entropy())
    }

    /// Create a simulation with deterministic wandering
    pub fn with_seed(
        config: SimulationConfig,
        entities: Vec<Entity>,
        client: IntegrationClient<B>,
        seed: u64,
    ) -> Result<Self, RosterError> {
        Self::with_rng(config, entities, client, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: SimulationConfig,
        entities: Vec<Entity>,
        client: IntegrationClient<B>,
        rng: StdRng,
    ) -> Result<Self, RosterError> {
        let bounds = WorldBounds::default();
        let store = EntityStore::new(entities, bounds)?;
        info!("Simulation started with {} entities", store.entities().len());

        Ok(Self {
            transcript: ChatLog::new(config.transcript_capacity),
            motion: MotionController::new(config.clone(), bounds),
            proximity: ProximityTrigger::new(config.engage_radius, config.disengage_radius),
            dialogue: DialogueDirector::new(client),
            store,
            config,
            rng,
        })
    }

    /// Advance one frame: collect finished dialogue, move everyone, count
    /// bubbles down, then check who the player just walked up to.
    pub fn tick(&mut self, input: &InputState) {
        self.poll_dialogue();

        let next = self.motion.step(self.store.entities(), input, &mut self.rng);
        self.store.replace(next);
        self.store.tick_bubbles(self.config.frame_delta_ms);

        for npc_id in self.proximity.update(self.store.entities()) {
            let Some(npc) = self.store.get(npc_id) else {
                continue;
            };
            // Engaged either way; a greeting dropped while busy is not retried
            if !self.dialogue.request(npc, DialogueKind::Greet) {
                debug!(npc = %npc.name, "Greeting skipped, dialogue busy");
            }
        }
    }

    /// Apply a finished dialogue request, if there is one
    pub fn poll_dialogue(&mut self) -> Option<DialogueOutcome> {
        let outcome = self.dialogue.poll()?;
        if let DialogueOutcome::Fulfilled {
            npc_id,
            npc_name,
            text,
        } = &outcome
        {
            info!(npc = %npc_name, "{}", text);
            self.transcript.push(npc_name.as_str(), text.as_str());
            self.store
                .set_bubble(*npc_id, text.as_str(), self.config.reply_bubble_ms);
        }
        Some(outcome)
    }

    /// Say `text` to the NPC `target`. The line is logged and shown above the
    /// player right away; the returned flag tells whether the NPC was actually
    /// asked to reply (false while another request is in flight).
    pub fn send_message(&mut self, target: EntityId, text: &str) -> Result<bool, CommandError> {
        let npc = self
            .store
            .get(target)
            .ok_or(CommandError::UnknownEntity(target))?;
        if npc.is_player {
            return Err(CommandError::NotAnNpc(target));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(CommandError::EmptyMessage);
        }
        let npc = npc.clone();

        self.transcript.push(PLAYER_SENDER, text);
        self.store
            .set_bubble(EntityId::PLAYER, text, self.config.player_bubble_ms);

        Ok(self.dialogue.request(
            &npc,
            DialogueKind::Respond {
                player_text: text.to_string(),
            },
        ))
    }

    /// Send the player walking toward `target`, clamped to the world
    pub fn move_player_to(&mut self, target: Vec2) {
        self.store.set_target(EntityId::PLAYER, target);
    }

    pub fn entities(&self) -> EntitySnapshot {
        self.store.snapshot()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.snapshot()
    }

    pub fn chat_log(&self) -> &ChatLog {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.dialogue.is_busy()
    }

    /// NPC whose reply is being awaited
    pub fn speaking(&self) -> Option<EntityId> {
        self.dialogue.speaking()
    }

    pub fn is_online(&self) -> bool {
        self.dialogue.is_online()
    }

    pub fn traces(&self) -> &HashMap<EntityId, MotionTrace> {
        self.motion.traces()
    }
}
