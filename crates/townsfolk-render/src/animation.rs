//! Walk cycle

/// Swing frequency in radians per millisecond
pub const SWING_RATE: f32 = 0.015;
/// Bob frequency in radians per millisecond
pub const BOB_RATE: f32 = 0.01;
/// Peak vertical bob in pixels
pub const BOB_HEIGHT: f32 = 4.0;
/// Limb offset in pixels at full swing
pub const LIMB_SWING: f32 = 5.0;

/// Animation offsets for one sprite on one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkPose {
    /// In [-1, 1]; legs and arms move in opposite phase
    pub swing: f32,
    /// Upward lift in pixels, in [0, BOB_HEIGHT]
    pub bob: f32,
}

impl WalkPose {
    pub const IDLE: WalkPose = WalkPose {
        swing: 0.0,
        bob: 0.0,
    };

    /// Vertical limb offset in pixels
    pub fn limb_offset(&self) -> f32 {
        self.swing * LIMB_SWING
    }
}

/// Pose at `elapsed_ms`; exactly zero when not moving
pub fn pose(is_moving: bool, elapsed_ms: f32) -> WalkPose {
    if !is_moving {
        return WalkPose::IDLE;
    }
    WalkPose {
        swing: (elapsed_ms * SWING_RATE).sin(),
        bob: (elapsed_ms * BOB_RATE).sin().abs() * BOB_HEIGHT,
    }
}
