//! Point-distance collision checks
//!
//! Every collision in the game is a center-distance test against a fixed
//! radius; the only subtlety is which radius applies to which pairing.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{Enemy, EnemyKind};

/// True when two centers are closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Radius a player bullet must come within to damage this enemy
pub fn hit_radius(enemy: &Enemy) -> f32 {
    match enemy.kind {
        EnemyKind::Grunt => GRUNT_HIT_RADIUS,
        EnemyKind::Boss(_) => BOSS_HIT_RADIUS,
    }
}

/// Radius at which this enemy's body touches the player
pub fn contact_radius(enemy: &Enemy) -> f32 {
    match enemy.kind {
        EnemyKind::Grunt => GRUNT_CONTACT_RADIUS,
        EnemyKind::Boss(_) => BOSS_CONTACT_RADIUS,
    }
}
