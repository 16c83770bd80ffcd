//! Townsfolk Render - frame composition
//!
//! Turns the town layout, the entity snapshot and the clock into a
//! `DrawList` of world-pixel shapes. Painting is left to the host UI.

pub mod animation;
pub mod entity_pass;
pub mod scene;
pub mod viewport;
pub mod world_pass;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use townsfolk_core::{Color, EntityId};
use townsfolk_game::{Entity, MotionTrace};
use townsfolk_world::{DayCycle, ParticleSystem, TownLayout};
use tracing::debug;

pub use animation::{pose, WalkPose};
pub use entity_pass::{bubble_label, BUBBLE_KEEP_CHARS, BUBBLE_MAX_CHARS};
pub use scene::{ellipse_points, DrawList, Shape};
pub use viewport::Viewport;

const NIGHT_TINT: (u8, u8, u8) = (10, 10, 40);

/// Holds the render-only state that persists across frames
pub struct FrameRenderer {
    layout: TownLayout,
    particles: ParticleSystem,
    day: DayCycle,
    arrival_epsilon: f32,
    rng: StdRng,
}

impl FrameRenderer {
    pub fn new(day: DayCycle, arrival_epsilon: f32) -> Self {
        Self::with_rng(day, arrival_epsilon, StdRng::from_entropy())
    }

    /// Deterministic flowers and spray
    pub fn with_seed(day: DayCycle, arrival_epsilon: f32, seed: u64) -> Self {
        Self::with_rng(day, arrival_epsilon, StdRng::seed_from_u64(seed))
    }

    fn with_rng(day: DayCycle, arrival_epsilon: f32, mut rng: StdRng) -> Self {
        let layout = TownLayout::generate(&mut rng);
        debug!(
            "Town generated: {} structures, {} lamps, {} flowers",
            layout.structures.len(),
            layout.street_lamps.len(),
            layout.flowers.len()
        );
        Self {
            layout,
            particles: ParticleSystem::new(),
            day,
            arrival_epsilon,
            rng,
        }
    }

    /// Step ambient effects by one frame
    pub fn advance(&mut self) {
        if let Some(spout) = world_pass::fountain_spout(&self.layout) {
            self.particles.emit(spout, &mut self.rng);
        }
        self.particles.update();
    }

    /// Compose one frame
    pub fn build(
        &self,
        entities: &[Entity],
        traces: &HashMap<EntityId, MotionTrace>,
        elapsed_ms: f32,
    ) -> DrawList {
        let mut list = DrawList::new();

        world_pass::draw_ground(&mut list, &self.layout);
        world_pass::draw_roads(&mut list, &self.layout);
        world_pass::draw_structures(&mut list, &self.layout);
        world_pass::draw_particles(&mut list, &self.particles);
        world_pass::draw_lamps(&mut list, &self.layout, self.day.lamps_lit(elapsed_ms));
        entity_pass::draw_entities(&mut list, entities, traces, self.arrival_epsilon, elapsed_ms);

        let alpha = self.day.night_alpha(elapsed_ms);
        if alpha > 0.0 {
            let (r, g, b) = NIGHT_TINT;
            list.push(Shape::ScreenTint {
                color: Color::from_rgb8(r, g, b, alpha),
            });
        }

        list
    }

    pub fn layout(&self) -> &TownLayout {
        &self.layout
    }

    pub fn day(&self) -> &DayCycle {
        &self.day
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use townsfolk_game::default_roster;

    fn renderer() -> FrameRenderer {
        FrameRenderer::with_seed(DayCycle::default(), 0.05, 11)
    }

    #[test]
    fn test_frame_layers_in_order() {
        let renderer = renderer();
        let list = renderer.build(&default_roster(), &HashMap::new(), 0.0);

        assert!(matches!(list.shapes()[0], Shape::Rect { .. }));
        let first_tag = list
            .iter()
            .position(|s| matches!(s, Shape::NameTag { .. }))
            .unwrap();
        let last_triangle = list
            .iter()
            .rposition(|s| matches!(s, Shape::Triangle { .. }))
            .unwrap();
        assert!(last_triangle < first_tag, "entities must draw over structures");

        let tags = list
            .iter()
            .filter(|s| matches!(s, Shape::NameTag { .. }))
            .count();
        assert_eq!(tags, 9);
    }

    #[test]
    fn test_night_tint_only_after_dark() {
        let renderer = renderer();
        let day = DayCycle::default();
        let roster = default_roster();

        // phase 0.5 at t=0: tint alpha 0.05
        let list = renderer.build(&roster, &HashMap::new(), 0.0);
        assert!(matches!(list.shapes().last(), Some(Shape::ScreenTint { .. })));

        // Find a time near full daylight where no tint is drawn
        let noon = std::f32::consts::FRAC_PI_2 / day.angular_rate;
        let list = renderer.build(&roster, &HashMap::new(), noon);
        assert!(!matches!(list.shapes().last(), Some(Shape::ScreenTint { .. })));
    }

    #[test]
    fn test_advance_spawns_spray() {
        let mut renderer = renderer();
        for _ in 0..60 {
            renderer.advance();
        }
        assert!(!renderer.particles().is_empty());
        for p in renderer.particles().particles() {
            assert!(p.life > 0.0);
        }
    }
}
