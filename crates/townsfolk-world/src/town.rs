//! Static town layout: dimensions, terrain, roads, structures and lamps

use glam::Vec2;
use rand::Rng;
use townsfolk_core::Color;

/// Pixels per tile on the world canvas
pub const TILE_SIZE: f32 = 32.0;
/// World width in tiles
pub const WORLD_WIDTH: f32 = 40.0;
/// World height in tiles
pub const WORLD_HEIGHT: f32 = 30.0;

/// Axis-aligned world bounds in tile units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
        }
    }
}

impl WorldBounds {
    /// Clamp a coordinate into the bounds
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Bounds shrunk by `margin` tiles on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// World size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        (self.max - self.min) * TILE_SIZE
    }
}

/// Kinds of static structure placed in the town
#[derive(Debug, Clone, PartialEq)]
pub enum StructureKind {
    Fountain,
    House { color: Color },
    Shop { color: Color, sign: &'static str },
    Bench,
    Tree,
}

/// A structure at a tile position
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub kind: StructureKind,
    pub position: Vec2,
}

impl Structure {
    fn new(kind: StructureKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Vec2::new(x, y),
        }
    }
}

/// Decorative flower scattered over the grass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flower {
    pub position: Vec2,
    pub color: Color,
}

/// Town plaza centre; roads radiate from here
pub const HUB: (i32, i32) = (20, 15);

const FLOWER_COUNT: usize = 80;
const FLOWER_COLORS: [u32; 4] = [0xf43f5e, 0xfbbf24, 0xffffff, 0x818cf8];

/// Everything static about the town
#[derive(Debug, Clone)]
pub struct TownLayout {
    pub bounds: WorldBounds,
    /// Structures, pre-sorted by Y so lower ones draw on top
    pub structures: Vec<Structure>,
    pub street_lamps: Vec<Vec2>,
    pub flowers: Vec<Flower>,
}

impl TownLayout {
    /// Build the standard town, scattering flowers with `rng`
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut structures = vec![
            Structure::new(StructureKind::Fountain, 20.0, 15.0),
            Structure::new(StructureKind::House { color: Color::from_hex(0xa1887f) }, 17.0, 12.0),
            Structure::new(StructureKind::House { color: Color::from_hex(0x94a3b8) }, 17.0, 18.0),
            Structure::new(StructureKind::House { color: Color::from_hex(0x90a4ae) }, 23.0, 12.0),
            Structure::new(StructureKind::House { color: Color::from_hex(0xbcaaa4) }, 23.0, 18.0),
            Structure::new(StructureKind::Shop { color: Color::from_hex(0xf59e0b), sign: "BAKE" }, 18.0, 10.0),
            Structure::new(StructureKind::Shop { color: Color::from_hex(0x10b981), sign: "GEAR" }, 22.0, 10.0),
            Structure::new(StructureKind::Bench, 18.5, 14.0),
            Structure::new(StructureKind::Bench, 21.5, 14.0),
            Structure::new(StructureKind::Tree, 5.0, 5.0),
            Structure::new(StructureKind::Tree, 7.0, 4.0),
            Structure::new(StructureKind::Tree, 34.0, 20.0),
            Structure::new(StructureKind::Tree, 36.0, 22.0),
            Structure::new(StructureKind::Tree, 12.0, 24.0),
            Structure::new(StructureKind::Tree, 28.0, 4.0),
        ];
        structures.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

        let street_lamps = [
            (19.0, 14.0), (21.0, 14.0),
            (19.0, 16.0), (21.0, 16.0),
            (15.0, 14.0), (25.0, 14.0),
            (20.0, 10.0), (20.0, 20.0),
        ]
        .into_iter()
        .map(|(x, y)| Vec2::new(x, y))
        .collect();

        let flowers = (0..FLOWER_COUNT)
            .map(|_| Flower {
                position: Vec2::new(
                    rng.gen::<f32>() * WORLD_WIDTH,
                    rng.gen::<f32>() * WORLD_HEIGHT,
                ),
                color: Color::from_hex(FLOWER_COLORS[rng.gen_range(0..FLOWER_COLORS.len())]),
            })
            .collect();

        Self {
            bounds: WorldBounds::default(),
            structures,
            street_lamps,
            flowers,
        }
    }

    /// Whether the tile at (x, y) is paved: the two axes through the hub
    /// plus the 3x3 plaza around it
    pub fn is_road(x: i32, y: i32) -> bool {
        let (hx, hy) = HUB;
        x == hx || y == hy || ((x - hx).abs() < 2 && (y - hy).abs() < 2)
    }

    /// All paved tiles in row-major order
    pub fn road_tiles(&self) -> impl Iterator<Item = (i32, i32)> {
        let width = WORLD_WIDTH as i32;
        let height = WORLD_HEIGHT as i32;
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| Self::is_road(x, y))
    }

    /// Tile position of the fountain, if the town has one
    pub fn fountain(&self) -> Option<Vec2> {
        self.structures
            .iter()
            .find(|s| s.kind == StructureKind::Fountain)
            .map(|s| s.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_structures_sorted_by_y() {
        let town = TownLayout::generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(town.structures.len(), 15);
        for pair in town.structures.windows(2) {
            assert!(pair[0].position.y <= pair[1].position.y);
        }
    }

    #[test]
    fn test_flowers_inside_world() {
        let town = TownLayout::generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(town.flowers.len(), 80);
        assert!(town.flowers.iter().all(|f| town.bounds.contains(f.position)));
    }

    #[test]
    fn test_road_pattern() {
        assert!(TownLayout::is_road(20, 0));
        assert!(TownLayout::is_road(0, 15));
        assert!(TownLayout::is_road(21, 16));
        assert!(TownLayout::is_road(19, 14));
        assert!(!TownLayout::is_road(22, 17));
        assert!(!TownLayout::is_road(5, 5));

        let town = TownLayout::generate(&mut StdRng::seed_from_u64(3));
        // 40 + 30 - 1 along the axes, plus 4 plaza corners
        assert_eq!(town.road_tiles().count(), 73);
    }

    #[test]
    fn test_bounds_clamp_and_inset() {
        let bounds = WorldBounds::default();
        assert_eq!(bounds.clamp(Vec2::new(-3.0, 50.0)), Vec2::new(0.0, 30.0));

        let inner = bounds.inset(2.0);
        assert_eq!(inner.min, Vec2::new(2.0, 2.0));
        assert_eq!(inner.max, Vec2::new(38.0, 28.0));
        assert_eq!(bounds.pixel_size(), Vec2::new(1280.0, 960.0));
    }

    #[test]
    fn test_fountain_lookup() {
        let town = TownLayout::generate(&mut StdRng::seed_from_u64(0));
        assert_eq!(town.fountain(), Some(Vec2::new(20.0, 15.0)));
    }
}
