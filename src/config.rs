//! Arena configuration
//!
//! Screen dimensions are supplied by the host once at session start; every
//! edge-spawn and bounds check in the sim goes through this value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl ArenaConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True while a point is on screen; projectiles leaving this are removed
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Clamp a point to stay `inset` pixels inside every edge
    pub fn clamp_inset(&self, pos: Vec2, inset: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(inset, self.width - inset),
            pos.y.clamp(inset, self.height - inset),
        )
    }
}
