//! Townsfolk World - the static town and its ambient systems
//!
//! Provides the town layout (terrain, roads, structures, lamps), the cyclic
//! day/night phase, and the fountain particle emitter.

pub mod particles;
pub mod time_of_day;
pub mod town;

pub use particles::{Particle, ParticleSystem};
pub use time_of_day::DayCycle;
pub use town::{
    Flower, Structure, StructureKind, TownLayout, WorldBounds, TILE_SIZE, WORLD_HEIGHT, WORLD_WIDTH,
};
