//! Read-only render snapshots
//!
//! A `Snapshot` is a flat, serializable view of one tick's observable state.
//! Front ends and logs consume snapshots; nothing ever writes back through
//! one.

use serde::{Deserialize, Serialize};

use crate::sim::boss::SpecialPhase;
use crate::sim::state::{GamePhase, GameState, ProjectileOwner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub speed_multiplier: f32,
    pub bullet_speed_multiplier: f32,
    pub bullet_damage: f32,
    pub bullet_tier: u8,
    pub bazooka_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub health: f32,
    /// Present only for bosses
    pub boss_tier: Option<u32>,
    /// True while a boss winds up a special attack
    pub telegraphing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub owner: ProjectileOwner,
}

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub kills: u32,
    pub wave: u32,
    pub shop_visits: u32,
    pub player: PlayerSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
}

impl GameState {
    /// Capture the current observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            kills: self.kills,
            wave: self.wave,
            shop_visits: self.shop_visits,
            player: PlayerSnapshot {
                x: self.player.pos.x,
                y: self.player.pos.y,
                hp: self.player.hp,
                max_hp: self.player.max_hp,
                speed_multiplier: self.player.speed_multiplier,
                bullet_speed_multiplier: self.player.bullet_speed_multiplier,
                bullet_damage: self.player.bullet_damage,
                bullet_tier: self.player.bullet_tier,
                bazooka_level: self.player.bazooka_level,
            },
            enemies: self
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    x: enemy.pos.x,
                    y: enemy.pos.y,
                    health: enemy.health,
                    boss_tier: enemy.boss().map(|b| b.tier),
                    telegraphing: enemy
                        .boss()
                        .is_some_and(|b| b.special == SpecialPhase::Telegraphing),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileSnapshot {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    owner: p.owner,
                })
                .collect(),
        }
    }
}
