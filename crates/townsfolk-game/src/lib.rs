//! Townsfolk Game - simulation logic
//!
//! Provides the entity store, player input, NPC wandering, proximity greetings,
//! the dialogue state machine, and the simulation context that ties them
//! together behind a small command surface.

pub mod chat_log;
pub mod config;
pub mod dialogue;
pub mod entity;
pub mod error;
pub mod input;
pub mod motion;
pub mod proximity;
pub mod simulation;

pub use chat_log::{ChatLog, ChatMessage, PLAYER_SENDER};
pub use config::SimulationConfig;
pub use dialogue::{DialogueDirector, DialogueKind, DialogueOutcome};
pub use entity::{default_roster, Entity, EntitySnapshot, EntityStore};
pub use error::{CommandError, RosterError};
pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use motion::{Facing, MotionController, MotionTrace};
pub use proximity::ProximityTrigger;
pub use simulation::Simulation;
