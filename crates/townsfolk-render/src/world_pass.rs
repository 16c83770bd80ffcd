//! Static scenery: ground, roads, structures, fountain spray and lamps

use glam::Vec2;
use townsfolk_core::Color;
use townsfolk_world::{ParticleSystem, Structure, StructureKind, TownLayout, TILE_SIZE};

use crate::scene::{DrawList, Shape};

const BACKGROUND: u32 = 0x0d0d12;
const GRASS_EVEN: u32 = 0x33691e;
const GRASS_ODD: u32 = 0x558b2f;
const COBBLE_BASE: u32 = 0x334155;
const COBBLE_LIGHT: u32 = 0x1e293b;
const COBBLE_DARK: u32 = 0x0f172a;
const FLOWER_SIZE: f32 = 2.0;
const DROPLET_SIZE: f32 = 2.0;

/// Stone rectangles inside one cobble tile, as (x, y, w, h) pixel offsets
const STONES: [(f32, f32, f32, f32); 3] = [
    (2.0, 2.0, 12.0, 12.0),
    (16.0, 4.0, 14.0, 10.0),
    (4.0, 16.0, 24.0, 12.0),
];

fn shadow(alpha: f32) -> Color {
    Color::BLACK.with_alpha(alpha)
}

/// Clear, grass stripes and flowers
pub fn draw_ground(list: &mut DrawList, layout: &TownLayout) {
    let world_px = layout.bounds.pixel_size();
    list.rect(Vec2::ZERO, world_px, Color::from_hex(BACKGROUND));

    let rows = (world_px.y / TILE_SIZE).ceil() as usize;
    for row in 0..rows {
        let color = if row % 2 == 0 { GRASS_EVEN } else { GRASS_ODD };
        list.rect(
            Vec2::new(0.0, row as f32 * TILE_SIZE),
            Vec2::new(world_px.x, TILE_SIZE),
            Color::from_hex(color),
        );
    }

    for flower in &layout.flowers {
        list.rect(flower.position * TILE_SIZE, Vec2::splat(FLOWER_SIZE), flower.color);
    }
}

/// Cobblestone on every paved tile
pub fn draw_roads(list: &mut DrawList, layout: &TownLayout) {
    for (tx, ty) in layout.road_tiles() {
        let origin = Vec2::new(tx as f32, ty as f32) * TILE_SIZE;
        list.rect(origin, Vec2::splat(TILE_SIZE), Color::from_hex(COBBLE_BASE));
        for (i, &(sx, sy, sw, sh)) in STONES.iter().enumerate() {
            let color = if i % 2 == 0 { COBBLE_LIGHT } else { COBBLE_DARK };
            list.rect(origin + Vec2::new(sx, sy), Vec2::new(sw, sh), Color::from_hex(color));
        }
    }
}

/// Structures in their stored (Y-sorted) order
pub fn draw_structures(list: &mut DrawList, layout: &TownLayout) {
    for structure in &layout.structures {
        draw_structure(list, structure);
    }
}

fn draw_structure(list: &mut DrawList, structure: &Structure) {
    let at = structure.position * TILE_SIZE;
    let px = |x: f32, y: f32| at + Vec2::new(x, y);

    match &structure.kind {
        StructureKind::Tree => {
            list.ellipse(px(16.0, 32.0), Vec2::new(16.0, 6.0), shadow(0.2));
            list.rect(px(12.0, 16.0), Vec2::new(8.0, 16.0), Color::from_hex(0x3e2723));
            list.circle(px(16.0, 8.0), 20.0, Color::from_hex(0x1b5e20));
            list.circle(px(10.0, 4.0), 12.0, Color::from_hex(0x2e7d32));
        }
        StructureKind::House { color } => {
            list.rect(px(6.0, 28.0), Vec2::new(32.0, 6.0), shadow(0.3));
            list.rect(px(2.0, 12.0), Vec2::new(28.0, 20.0), *color);
            list.push(Shape::Triangle {
                points: [px(-2.0, 14.0), px(16.0, 0.0), px(34.0, 14.0)],
                color: Color::from_hex(0x3e2723),
            });
        }
        StructureKind::Bench => {
            let wood = Color::from_hex(0x4e342e);
            list.rect(px(0.0, 20.0), Vec2::new(32.0, 4.0), wood);
            list.rect(px(4.0, 24.0), Vec2::new(2.0, 4.0), wood);
            list.rect(px(26.0, 24.0), Vec2::new(2.0, 4.0), wood);
        }
        StructureKind::Fountain => {
            list.circle(px(16.0, 16.0), 28.0, Color::from_hex(0x475569));
            list.circle(px(16.0, 16.0), 20.0, Color::from_hex(0x0ea5e9));
        }
        StructureKind::Shop { color, sign } => {
            list.rect(px(0.0, 12.0), Vec2::new(32.0, 20.0), Color::from_hex(0xf5f5f5));
            list.rect(px(-4.0, 0.0), Vec2::new(40.0, 12.0), *color);
            list.push(Shape::Text {
                pos: px(2.0, 9.0),
                text: (*sign).to_string(),
                size: 6.0,
                color: Color::WHITE,
            });
        }
    }
}

/// Where fountain droplets spawn, in world pixels
pub fn fountain_spout(layout: &TownLayout) -> Option<Vec2> {
    layout
        .fountain()
        .map(|tile| tile * TILE_SIZE + Vec2::new(16.0, 14.0))
}

pub fn draw_particles(list: &mut DrawList, particles: &ParticleSystem) {
    for p in particles.particles() {
        list.rect(
            p.position,
            Vec2::splat(DROPLET_SIZE),
            Color::from_rgb8(186, 230, 253, p.alpha()),
        );
    }
}

/// Lamp posts, with the bulb lit at night
pub fn draw_lamps(list: &mut DrawList, layout: &TownLayout, lit: bool) {
    let bulb = if lit { 0xfbbf24 } else { 0x1e293b };
    for lamp in &layout.street_lamps {
        let at = *lamp * TILE_SIZE + Vec2::new(14.0, 0.0);
        list.rect(at + Vec2::new(0.0, 4.0), Vec2::new(4.0, 28.0), Color::from_hex(0x0f172a));
        list.rect(at + Vec2::new(-2.0, 0.0), Vec2::new(8.0, 4.0), Color::from_hex(0x334155));
        list.rect(at + Vec2::new(0.0, 1.0), Vec2::new(4.0, 4.0), Color::from_hex(bulb));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn town() -> TownLayout {
        TownLayout::generate(&mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_ground_starts_with_clear_and_stripes() {
        let mut list = DrawList::new();
        draw_ground(&mut list, &town());
        // clear + 30 stripes + 80 flowers
        assert_eq!(list.len(), 1 + 30 + 80);
        match &list.shapes()[1] {
            Shape::Rect { color, .. } => assert_eq!(*color, Color::from_hex(GRASS_EVEN)),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_lamp_bulb_follows_lit_flag() {
        let layout = town();
        let bulb_color = |lit| {
            let mut list = DrawList::new();
            draw_lamps(&mut list, &layout, lit);
            assert_eq!(list.len(), layout.street_lamps.len() * 3);
            match &list.shapes()[2] {
                Shape::Rect { color, .. } => *color,
                other => panic!("unexpected shape {:?}", other),
            }
        };
        assert_eq!(bulb_color(true), Color::from_hex(0xfbbf24));
        assert_eq!(bulb_color(false), Color::from_hex(0x1e293b));
    }

    #[test]
    fn test_fountain_spout_position() {
        assert_eq!(fountain_spout(&town()), Some(Vec2::new(656.0, 494.0)));
    }
}
