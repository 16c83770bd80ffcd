//! Townsfolk Core - Core types and utilities for the Townsfolk simulation
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Entity identifiers and colors
//! - Frame clock driving simulation ticks and animation phase

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{FrameClock, TimeConfig};
pub use types::{Color, EntityId};
