//! Per-tick motion for the player and wandering NPCs

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;
use townsfolk_core::EntityId;
use townsfolk_world::WorldBounds;

use crate::config::SimulationConfig;
use crate::entity::Entity;
use crate::input::InputState;

/// Horizontal direction a sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing after a horizontal step of `dx`; zero keeps the previous one
    pub fn after_step(self, dx: f32) -> Self {
        if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            self
        }
    }
}

/// What happened to one entity on the last motion tick. Render-only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionTrace {
    /// Displacement applied this tick
    pub step: Vec2,
    pub facing: Facing,
}

impl MotionTrace {
    pub fn moved(&self) -> bool {
        self.step != Vec2::ZERO
    }
}

/// Move `pos` toward `target` by `speed`, or snap onto it once within `epsilon`
pub fn seek_step(pos: Vec2, target: Vec2, speed: f32, epsilon: f32) -> Vec2 {
    let delta = target - pos;
    let distance = delta.length();
    if distance > epsilon {
        pos + delta / distance * speed
    } else {
        target
    }
}

/// Normalized direction from held movement keys, if any
pub fn input_direction(input: &InputState) -> Option<Vec2> {
    let axes = input.movement_axes();
    if axes == Vec2::ZERO {
        None
    } else {
        Some(axes.normalize())
    }
}

/// Advances every entity by one fixed step
#[derive(Debug, Clone)]
pub struct MotionController {
    config: SimulationConfig,
    bounds: WorldBounds,
    traces: HashMap<EntityId, MotionTrace>,
}

impl MotionController {
    pub fn new(config: SimulationConfig, bounds: WorldBounds) -> Self {
        Self {
            config,
            bounds,
            traces: HashMap::new(),
        }
    }

    /// Compute the next entity list. The input slice is left untouched; the
    /// caller swaps the result into the store as a whole.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        entities: &[Entity],
        input: &InputState,
        rng: &mut R,
    ) -> Vec<Entity> {
        let direction = input_direction(input);
        let eps = self.config.arrival_epsilon;

        entities
            .iter()
            .map(|entity| {
                let mut next = entity.clone();

                if entity.is_player {
                    let speed = self.config.player_walk_speed;
                    match direction {
                        Some(dir) => {
                            next.pos = self.bounds.clamp(entity.pos + dir * speed);
                            next.target_pos = next.pos;
                        }
                        None => next.pos = seek_step(entity.pos, entity.target_pos, speed, eps),
                    }
                } else {
                    if rng.gen::<f32>() < self.config.wander_chance {
                        next.target_pos = self.wander_target(entity.pos, rng);
                    }
                    next.pos = seek_step(entity.pos, next.target_pos, self.config.npc_walk_speed, eps);
                }

                let step = next.pos - entity.pos;
                let trace = self.traces.entry(entity.id).or_default();
                trace.step = step;
                trace.facing = trace.facing.after_step(step.x);

                next
            })
            .collect()
    }

    fn wander_target<R: Rng + ?Sized>(&self, origin: Vec2, rng: &mut R) -> Vec2 {
        let radius = self.config.wander_radius;
        let offset = Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * radius,
            (rng.gen::<f32>() - 0.5) * 2.0 * radius,
        );
        self.bounds
            .inset(self.config.wander_margin)
            .clamp(origin + offset)
    }

    /// Trace for one entity from the last tick
    pub fn trace(&self, id: EntityId) -> MotionTrace {
        self.traces.get(&id).copied().unwrap_or_default()
    }

    pub fn traces(&self) -> &HashMap<EntityId, MotionTrace> {
        &self.traces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use townsfolk_core::Color;

    fn controller(wander_chance: f32) -> MotionController {
        let config = SimulationConfig {
            wander_chance,
            ..SimulationConfig::default()
        };
        MotionController::new(config, WorldBounds::default())
    }

    #[test]
    fn test_seek_snaps_within_epsilon() {
        let pos = Vec2::new(10.0, 10.0);
        let target = Vec2::new(10.03, 10.0);
        assert_eq!(seek_step(pos, target, 0.04, 0.05), target);
    }

    #[test]
    fn test_seek_moves_by_speed() {
        let next = seek_step(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.5, 0.05);
        assert!((next - Vec2::new(0.3, 0.4)).length() < 1e-6);
    }

    #[test]
    fn test_npc_seek_lands_exactly_on_target() {
        let mut motion = controller(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut npc = Entity::npc(EntityId::npc(1), "Eliza", Vec2::new(10.0, 10.0), Color::WHITE);
        npc.target_pos = Vec2::new(10.03, 10.0);

        let next = motion.step(&[npc.clone()], &InputState::new(), &mut rng);
        assert_eq!(next[0].pos, npc.target_pos);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let mut motion = controller(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let player = Entity::player("You", Vec2::new(20.0, 15.0), Color::WHITE);

        let mut input = InputState::new();
        input.held.insert(InputAction::MoveDown);
        input.held.insert(InputAction::MoveRight);

        let next = motion.step(&[player.clone()], &input, &mut rng);
        let moved = next[0].pos - player.pos;
        assert!((moved.length() - 0.08).abs() < 1e-5);
        assert_eq!(next[0].target_pos, next[0].pos);
        assert_eq!(motion.trace(EntityId::PLAYER).facing, Facing::Right);
    }

    #[test]
    fn test_releasing_keys_stops_player() {
        let mut motion = controller(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut entities = vec![Entity::player("You", Vec2::new(20.0, 15.0), Color::WHITE)];

        let mut input = InputState::new();
        input.held.insert(InputAction::MoveLeft);
        for _ in 0..5 {
            entities = motion.step(&entities, &input, &mut rng);
        }
        let stopped_at = entities[0].pos;
        assert_eq!(motion.trace(EntityId::PLAYER).facing, Facing::Left);

        input.held.clear();
        entities = motion.step(&entities, &input, &mut rng);
        assert_eq!(entities[0].pos, stopped_at);
        assert!(!motion.trace(EntityId::PLAYER).moved());
        // Facing is kept when standing still
        assert_eq!(motion.trace(EntityId::PLAYER).facing, Facing::Left);
    }

    #[test]
    fn test_player_walks_twice_as_fast_as_npcs() {
        let mut motion = controller(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = Entity::player("You", Vec2::new(5.0, 5.0), Color::WHITE);
        player.target_pos = Vec2::new(15.0, 5.0);
        let mut npc = Entity::npc(EntityId::npc(1), "Rig", Vec2::new(5.0, 10.0), Color::WHITE);
        npc.target_pos = Vec2::new(15.0, 10.0);

        let next = motion.step(&[player.clone(), npc.clone()], &InputState::new(), &mut rng);
        let player_step = next[0].pos.x - player.pos.x;
        let npc_step = next[1].pos.x - npc.pos.x;
        assert!((player_step / npc_step - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_wander_targets_stay_inside_margin() {
        let mut motion = controller(1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut entities = vec![Entity::npc(EntityId::npc(1), "Byron", Vec2::new(1.0, 29.0), Color::WHITE)];

        for _ in 0..200 {
            entities = motion.step(&entities, &InputState::new(), &mut rng);
            let target = entities[0].target_pos;
            assert!((2.0..=38.0).contains(&target.x), "x out of range: {}", target.x);
            assert!((2.0..=28.0).contains(&target.y), "y out of range: {}", target.y);
        }
    }
}
