//! Simulation tuning

use serde::{Deserialize, Serialize};

/// Tunable constants for motion, proximity and dialogue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Player speed in tiles per frame
    pub player_walk_speed: f32,
    /// NPC speed in tiles per frame
    pub npc_walk_speed: f32,
    /// Distance below which an entity snaps onto its target
    pub arrival_epsilon: f32,
    /// Per-frame probability that an NPC picks a new wander target
    pub wander_chance: f32,
    /// Maximum wander offset on each axis, in tiles
    pub wander_radius: f32,
    /// Wander targets stay this many tiles away from the world edge
    pub wander_margin: f32,
    /// Fixed time step per frame for bubble timers, in milliseconds
    pub frame_delta_ms: f32,
    /// NPCs closer than this greet the player
    pub engage_radius: f32,
    /// NPCs farther than this may greet again on the next approach
    pub disengage_radius: f32,
    /// How long an NPC reply stays visible, in milliseconds
    pub reply_bubble_ms: f32,
    /// How long a player message stays visible, in milliseconds
    pub player_bubble_ms: f32,
    /// Number of transcript entries kept
    pub transcript_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            player_walk_speed: 0.08,
            npc_walk_speed: 0.04,
            arrival_epsilon: 0.05,
            wander_chance: 0.003,
            wander_radius: 7.0,
            wander_margin: 2.0,
            frame_delta_ms: 16.0,
            engage_radius: 2.5,
            disengage_radius: 6.0,
            reply_bubble_ms: 4000.0,
            player_bubble_ms: 3000.0,
            transcript_capacity: 15,
        }
    }
}
