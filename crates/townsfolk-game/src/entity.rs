//! Entities and the authoritative entity store
//!
//! The store hands out immutable snapshots. Every mutation goes through
//! copy-on-write, so a snapshot taken by the renderer or the UI never
//! observes a half-applied frame.

use std::collections::HashSet;
use std::sync::Arc;

use glam::Vec2;
use townsfolk_core::{Color, EntityId};
use townsfolk_world::WorldBounds;

use crate::error::RosterError;

/// One simulated actor
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Current position in tile units
    pub pos: Vec2,
    /// Destination; the entity is idle once it sits here
    pub target_pos: Vec2,
    pub color: Color,
    /// Most recent utterance. Kept after the timer runs out, just not shown.
    pub bubble_text: Option<String>,
    /// Milliseconds the bubble remains visible
    pub bubble_timer_ms: f32,
    pub is_player: bool,
}

impl Entity {
    /// An NPC standing still at `pos`
    pub fn npc(id: EntityId, name: impl Into<String>, pos: Vec2, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            target_pos: pos,
            color,
            bubble_text: None,
            bubble_timer_ms: 0.0,
            is_player: false,
        }
    }

    /// The player avatar standing still at `pos`
    pub fn player(name: impl Into<String>, pos: Vec2, color: Color) -> Self {
        Self {
            is_player: true,
            ..Self::npc(EntityId::PLAYER, name, pos, color)
        }
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Whether the entity still has somewhere to walk to
    pub fn is_seeking(&self, epsilon: f32) -> bool {
        self.pos.distance(self.target_pos) > epsilon
    }

    /// The bubble text, but only while its timer is running
    pub fn visible_bubble(&self) -> Option<&str> {
        if self.bubble_timer_ms > 0.0 {
            self.bubble_text.as_deref()
        } else {
            None
        }
    }

    fn tick_bubble(&mut self, elapsed_ms: f32) {
        self.bubble_timer_ms = (self.bubble_timer_ms - elapsed_ms.max(0.0)).max(0.0);
    }
}

/// Shared read-only view of the entity list
pub type EntitySnapshot = Arc<Vec<Entity>>;

/// Authoritative set of entities
#[derive(Debug, Clone)]
pub struct EntityStore {
    entities: EntitySnapshot,
    bounds: WorldBounds,
}

impl EntityStore {
    /// Build a store, checking that there is exactly one player and that ids
    /// are unique. Positions are clamped into `bounds`.
    pub fn new(entities: Vec<Entity>, bounds: WorldBounds) -> Result<Self, RosterError> {
        let mut seen = HashSet::new();
        for entity in &entities {
            if !seen.insert(entity.id) {
                return Err(RosterError::DuplicateId(entity.id));
            }
        }
        match entities.iter().filter(|e| e.is_player).count() {
            0 => return Err(RosterError::NoPlayer),
            1 => {}
            _ => return Err(RosterError::MultiplePlayers),
        }

        let mut store = Self {
            entities: Arc::new(Vec::new()),
            bounds,
        };
        store.replace(entities);
        Ok(store)
    }

    /// Cheap snapshot of the whole list
    pub fn snapshot(&self) -> EntitySnapshot {
        Arc::clone(&self.entities)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_player)
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Swap in a whole new entity list (one motion tick). Ids and the player
    /// flag must carry over unchanged from the current list.
    pub fn replace(&mut self, mut next: Vec<Entity>) {
        for entity in &mut next {
            entity.pos = self.bounds.clamp(entity.pos);
            entity.target_pos = self.bounds.clamp(entity.target_pos);
            entity.bubble_timer_ms = entity.bubble_timer_ms.max(0.0);
        }
        debug_assert!(
            self.entities.is_empty()
                || self.entities.iter().map(|e| (e.id, e.is_player)).eq(next.iter().map(|e| (e.id, e.is_player))),
            "motion tick must not add, drop or reorder entities"
        );
        self.entities = Arc::new(next);
    }

    /// Set position and target of one entity. Returns false for unknown ids.
    pub fn update_position(&mut self, id: EntityId, pos: Vec2, target_pos: Vec2) -> bool {
        let bounds = self.bounds;
        self.modify(id, |e| {
            e.pos = bounds.clamp(pos);
            e.target_pos = bounds.clamp(target_pos);
        })
    }

    /// Set only the target of one entity
    pub fn set_target(&mut self, id: EntityId, target_pos: Vec2) -> bool {
        let bounds = self.bounds;
        self.modify(id, |e| e.target_pos = bounds.clamp(target_pos))
    }

    /// Show `text` above an entity for `duration_ms`
    pub fn set_bubble(&mut self, id: EntityId, text: impl Into<String>, duration_ms: f32) -> bool {
        let text = text.into();
        self.modify(id, |e| {
            e.bubble_text = Some(text);
            e.bubble_timer_ms = duration_ms.max(0.0);
        })
    }

    /// Count every bubble timer down by `elapsed_ms`, flooring at zero
    pub fn tick_bubbles(&mut self, elapsed_ms: f32) {
        if self.entities.iter().all(|e| e.bubble_timer_ms <= 0.0) {
            return;
        }
        for entity in Arc::make_mut(&mut self.entities) {
            entity.tick_bubble(elapsed_ms);
        }
    }

    fn modify(&mut self, id: EntityId, f: impl FnOnce(&mut Entity)) -> bool {
        let Some(index) = self.entities.iter().position(|e| e.id == id) else {
            return false;
        };
        f(&mut Arc::make_mut(&mut self.entities)[index]);
        true
    }
}

/// The town's inhabitants at session start
pub fn default_roster() -> Vec<Entity> {
    let npcs = [
        ("Byron", 34.0, 24.0, 0xec4899),
        ("Eliza", 22.0, 12.0, 0x10b981),
        ("Marcus", 5.0, 15.0, 0xf59e0b),
        ("Ciara", 10.0, 5.0, 0x06b6d4),
        ("Zerebro", 18.0, 4.0, 0x8b5cf6),
        ("Lola", 25.0, 22.0, 0xf43f5e),
        ("Zerepy", 32.0, 8.0, 0x10b981),
        ("Rig", 12.0, 26.0, 0x78350f),
    ];

    let mut roster = vec![Entity::player(
        crate::chat_log::PLAYER_SENDER,
        Vec2::new(20.0, 15.0),
        Color::from_hex(0x3b82f6),
    )];
    roster.extend(npcs.iter().zip(1u32..).map(|(&(name, x, y, hex), index)| {
        Entity::npc(EntityId::npc(index), name, Vec2::new(x, y), Color::from_hex(hex))
    }));
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EntityStore {
        EntityStore::new(default_roster(), WorldBounds::default()).unwrap()
    }

    #[test]
    fn test_default_roster_is_valid() {
        let store = store();
        assert_eq!(store.entities().len(), 9);
        assert_eq!(store.player().unwrap().id, EntityId::PLAYER);
        assert_eq!(store.get(EntityId::npc(2)).unwrap().name, "Eliza");
    }

    #[test]
    fn test_roster_validation() {
        let mut roster = default_roster();
        roster.remove(0);
        assert_eq!(
            EntityStore::new(roster, WorldBounds::default()).unwrap_err(),
            RosterError::NoPlayer
        );

        let mut roster = default_roster();
        roster.push(Entity {
            id: EntityId(99),
            ..Entity::player("Twin", Vec2::ZERO, Color::WHITE)
        });
        assert_eq!(
            EntityStore::new(roster, WorldBounds::default()).unwrap_err(),
            RosterError::MultiplePlayers
        );

        let mut roster = default_roster();
        roster.push(Entity::npc(EntityId::npc(1), "Byron again", Vec2::ZERO, Color::WHITE));
        assert_eq!(
            EntityStore::new(roster, WorldBounds::default()).unwrap_err(),
            RosterError::DuplicateId(EntityId::npc(1))
        );
    }

    #[test]
    fn test_positions_clamped_on_write() {
        let mut store = store();
        assert!(store.update_position(EntityId::npc(1), Vec2::new(-5.0, 12.0), Vec2::new(99.0, 99.0)));

        let byron = store.get(EntityId::npc(1)).unwrap();
        assert_eq!(byron.pos, Vec2::new(0.0, 12.0));
        assert_eq!(byron.target_pos, Vec2::new(40.0, 30.0));

        assert!(!store.set_target(EntityId::npc(42), Vec2::ZERO));
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let mut store = store();
        let before = store.snapshot();

        store.set_bubble(EntityId::npc(3), "Morning!", 4000.0);

        assert!(before[3].bubble_text.is_none());
        assert_eq!(store.get(EntityId::npc(3)).unwrap().visible_bubble(), Some("Morning!"));
    }

    #[test]
    fn test_bubble_timer_never_negative_and_monotonic() {
        let mut store = store();
        store.set_bubble(EntityId::npc(1), "Hi", 50.0);

        let mut last = f32::MAX;
        for _ in 0..10 {
            store.tick_bubbles(16.0);
            let timer = store.get(EntityId::npc(1)).unwrap().bubble_timer_ms;
            assert!(timer >= 0.0);
            assert!(timer <= last);
            last = timer;
        }

        let byron = store.get(EntityId::npc(1)).unwrap();
        assert_eq!(byron.bubble_timer_ms, 0.0);
        // Text is retained, only hidden
        assert_eq!(byron.bubble_text.as_deref(), Some("Hi"));
        assert_eq!(byron.visible_bubble(), None);
    }
}
