//! Greeting trigger with engage/disengage hysteresis

use std::collections::HashSet;

use townsfolk_core::EntityId;
use tracing::debug;

use crate::entity::Entity;

/// Tracks which NPCs have already greeted the player on the current approach
#[derive(Debug, Clone)]
pub struct ProximityTrigger {
    engage_radius: f32,
    disengage_radius: f32,
    engaged: HashSet<EntityId>,
}

impl ProximityTrigger {
    pub fn new(engage_radius: f32, disengage_radius: f32) -> Self {
        Self {
            engage_radius,
            disengage_radius: disengage_radius.max(engage_radius),
            engaged: HashSet::new(),
        }
    }

    /// Evaluate the current positions. Returns the NPCs that just came within
    /// the engage radius; each is marked engaged until it leaves the
    /// disengage radius again.
    pub fn update(&mut self, entities: &[Entity]) -> Vec<EntityId> {
        let Some(player) = entities.iter().find(|e| e.is_player) else {
            return Vec::new();
        };

        let mut fired = Vec::new();
        for npc in entities.iter().filter(|e| !e.is_player) {
            let distance = npc.distance_to(player);
            if distance < self.engage_radius {
                if self.engaged.insert(npc.id) {
                    debug!(npc = %npc.name, distance, "Engaged");
                    fired.push(npc.id);
                }
            } else if distance > self.disengage_radius && self.engaged.remove(&npc.id) {
                debug!(npc = %npc.name, distance, "Disengaged");
            }
        }
        fired
    }

    pub fn is_engaged(&self, id: EntityId) -> bool {
        self.engaged.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use townsfolk_core::Color;

    fn pair(distance: f32) -> Vec<Entity> {
        vec![
            Entity::player("You", Vec2::new(10.0, 10.0), Color::WHITE),
            Entity::npc(EntityId::npc(1), "Eliza", Vec2::new(10.0 + distance, 10.0), Color::WHITE),
        ]
    }

    #[test]
    fn test_fires_once_per_approach() {
        let mut trigger = ProximityTrigger::new(2.5, 6.0);
        let mut total = 0;
        for distance in [10.0, 5.0, 2.0, 1.0, 2.0, 5.0, 10.0] {
            total += trigger.update(&pair(distance)).len();
        }
        assert_eq!(total, 1);
        assert!(!trigger.is_engaged(EntityId::npc(1)));

        // A second approach greets again
        assert_eq!(trigger.update(&pair(1.0)), vec![EntityId::npc(1)]);
    }

    #[test]
    fn test_hysteresis_band_keeps_state() {
        let mut trigger = ProximityTrigger::new(2.5, 6.0);
        assert_eq!(trigger.update(&pair(1.0)).len(), 1);

        // Between the radii nothing changes
        assert!(trigger.update(&pair(4.0)).is_empty());
        assert!(trigger.is_engaged(EntityId::npc(1)));
        assert!(trigger.update(&pair(2.0)).is_empty());
    }

    #[test]
    fn test_never_engaged_from_band() {
        let mut trigger = ProximityTrigger::new(2.5, 6.0);
        assert!(trigger.update(&pair(4.0)).is_empty());
        assert!(!trigger.is_engaged(EntityId::npc(1)));
    }

    #[test]
    fn test_no_player_is_a_no_op() {
        let mut trigger = ProximityTrigger::new(2.5, 6.0);
        let npcs = vec![Entity::npc(EntityId::npc(1), "Rig", Vec2::ZERO, Color::WHITE)];
        assert!(trigger.update(&npcs).is_empty());
    }
}
