//! Character sprites, name tags and speech bubbles

use std::borrow::Cow;
use std::collections::HashMap;

use glam::Vec2;
use townsfolk_core::{Color, EntityId};
use townsfolk_game::{Entity, Facing, MotionTrace};
use townsfolk_world::TILE_SIZE;

use crate::animation::{pose, WalkPose};
use crate::scene::{DrawList, Shape};

/// Bubbles longer than this many characters are cut
pub const BUBBLE_MAX_CHARS: usize = 25;
/// Characters kept when a bubble is cut, before the ellipsis
pub const BUBBLE_KEEP_CHARS: usize = 22;

const SKIN: u32 = 0xf5d6a7;
const NAME_SIZE: f32 = 6.0;
const BUBBLE_SIZE: f32 = 7.0;
const ARM_ALPHA: f32 = 0.7;

/// Text shown in a speech bubble, cut to fit
pub fn bubble_label(text: &str) -> Cow<'_, str> {
    if text.chars().count() > BUBBLE_MAX_CHARS {
        let kept: String = text.chars().take(BUBBLE_KEEP_CHARS).collect();
        Cow::Owned(format!("{}...", kept))
    } else {
        Cow::Borrowed(text)
    }
}

/// Whether the sprite should play its walk cycle this frame. The final snap
/// onto the target is not a walking step.
pub fn is_moving(entity: &Entity, trace: Option<&MotionTrace>, epsilon: f32) -> bool {
    entity.is_seeking(epsilon) || trace.is_some_and(|t| t.step.length() > epsilon)
}

/// Every entity, lower ones (larger Y) drawn last
pub fn draw_entities(
    list: &mut DrawList,
    entities: &[Entity],
    traces: &HashMap<EntityId, MotionTrace>,
    epsilon: f32,
    elapsed_ms: f32,
) {
    let mut sorted: Vec<&Entity> = entities.iter().collect();
    sorted.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    for entity in sorted {
        let trace = traces.get(&entity.id);
        let walk = pose(is_moving(entity, trace, epsilon), elapsed_ms);
        let facing = trace.map(|t| t.facing).unwrap_or_default();
        draw_entity(list, entity, walk, facing);
    }
}

fn draw_entity(list: &mut DrawList, entity: &Entity, walk: WalkPose, facing: Facing) {
    let at = entity.pos * TILE_SIZE;
    let bob = walk.bob;
    let limb = walk.limb_offset();
    let px = |x: f32, y: f32| at + Vec2::new(x, y);
    let color = entity.color;

    list.ellipse(px(16.0, 30.0), Vec2::new(10.0, 5.0), Color::BLACK.with_alpha(0.2));

    // Legs
    list.rect(px(11.0, 24.0 - bob + limb), Vec2::new(4.0, 8.0), color);
    list.rect(px(17.0, 24.0 - bob - limb), Vec2::new(4.0, 8.0), color);

    // Body
    list.rect(px(10.0, 14.0 - bob), Vec2::new(12.0, 12.0), color);

    // Arms
    let arm = color.with_alpha(color.a * ARM_ALPHA);
    list.rect(px(7.0, 14.0 - bob - limb), Vec2::new(3.0, 10.0), arm);
    list.rect(px(22.0, 14.0 - bob + limb), Vec2::new(3.0, 10.0), arm);

    // Head and eyes
    list.rect(px(11.0, 4.0 - bob), Vec2::new(10.0, 10.0), Color::from_hex(SKIN));
    let look = match facing {
        Facing::Left => -2.0,
        Facing::Right => 2.0,
    };
    list.rect(px(13.0 + look, 8.0 - bob), Vec2::splat(2.0), Color::BLACK);
    list.rect(px(17.0 + look, 8.0 - bob), Vec2::splat(2.0), Color::BLACK);

    list.push(Shape::NameTag {
        center_x: at.x + 16.0,
        bottom: at.y - 8.0,
        text: entity.name.clone(),
        size: NAME_SIZE,
    });

    if let Some(text) = entity.visible_bubble() {
        list.push(Shape::SpeechBubble {
            tail: px(16.0, -14.0 - bob),
            text: bubble_label(text).into_owned(),
            size: BUBBLE_SIZE,
        });
    }
}
