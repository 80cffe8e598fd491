//! Session state and core simulation types
//!
//! One `GameState` value holds the entire session. It is created at session
//! start and replaced wholesale on restart; no subsystem keeps state of its
//! own.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::consts::*;
use crate::sim::boss::{BossState, ScheduledAction};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances every tick
    Running,
    /// Boss defeated; ticking is blocked until an upgrade is chosen
    ShopOpen,
    /// Player died; ticking is blocked until restart
    GameOver,
}

/// The player entity. Exactly one per session.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub max_hp: i32,
    pub hp: i32,
    pub speed_multiplier: f32,
    pub bullet_speed_multiplier: f32,
    pub bullet_damage: f32,
    /// Bullet color tier (0-4), raised by the BulletPower upgrade
    pub bullet_tier: u8,
    /// 0 = off, 1 = mirror shot, 2+ = mirror plus a random-angle shot
    pub bazooka_level: u32,
}

impl Player {
    fn new(arena: &ArenaConfig) -> Self {
        Self {
            pos: arena.center(),
            max_hp: 1,
            hp: 1,
            speed_multiplier: 1.0,
            bullet_speed_multiplier: 1.0,
            bullet_damage: 1.0,
            bullet_tier: 0,
            bazooka_level: 0,
        }
    }

    /// Effective movement speed per tick
    pub fn speed(&self) -> f32 {
        PLAYER_SPEED * self.speed_multiplier
    }
}

/// What an enemy is. Grunts carry no boss fields, so a "grunt with a tier"
/// is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyKind {
    Grunt,
    Boss(BossState),
}

/// A hostile entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Fractional health; bullet damage can be non-integral
    pub health: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }

    pub fn boss(&self) -> Option<&BossState> {
        match &self.kind {
            EnemyKind::Boss(boss) => Some(boss),
            EnemyKind::Grunt => None,
        }
    }

    pub fn boss_mut(&mut self) -> Option<&mut BossState> {
        match &mut self.kind {
            EnemyKind::Boss(boss) => Some(boss),
            EnemyKind::Grunt => None,
        }
    }
}

/// Who fired a projectile; enemy shots always deal 1 HP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: ProjectileOwner,
}

/// Permanent upgrades offered once per shop visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// +0.5 bullet-speed multiplier
    FasterGun,
    /// +1 bazooka level (unbounded)
    Bazooka,
    /// +0.5 player-speed multiplier
    Shoes,
    /// +0.5 damage and +1 bullet tier, until tier 4
    BulletPower,
    /// +1 max HP and +1 current HP
    Heart,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: ArenaConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Id of the live boss, if any; at most one at a time
    pub boss_id: Option<u32>,
    pub kills: u32,
    pub kills_this_wave: u32,
    /// Wave number, starts at 1 and never decreases
    pub wave: u32,
    pub shop_visits: u32,
    /// Spawn health of new grunts; +1 per shop visit
    pub enemy_base_health: f32,
    pub enemy_speed_multiplier: f32,
    /// Drives the next boss's health: 50 * 2^n
    pub bosses_defeated: u32,
    /// Kill count that last triggered a boss spawn, so each threshold fires once
    pub last_boss_spawn_kills: u32,
    pub last_spawn_tick: u64,
    pub last_shot_tick: u64,
    /// Pending boss special actions, validated at fire time
    pub scheduled: Vec<ScheduledAction>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session for the given arena and seed
    pub fn new(arena: ArenaConfig, seed: u64) -> Self {
        Self {
            arena,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            player: Player::new(&arena),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            boss_id: None,
            kills: 0,
            kills_this_wave: 0,
            wave: 1,
            shop_visits: 0,
            enemy_base_health: 1.0,
            enemy_speed_multiplier: 1.0,
            bosses_defeated: 0,
            last_boss_spawn_kills: 0,
            last_spawn_tick: 0,
            last_shot_tick: 0,
            scheduled: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ids at or above the watermark were allocated after this call
    pub fn id_watermark(&self) -> u32 {
        self.next_id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Effective enemy movement speed per tick
    pub fn enemy_speed(&self) -> f32 {
        ENEMY_SPEED * self.enemy_speed_multiplier
    }

    /// Health the next boss will spawn with
    pub fn next_boss_health(&self) -> f32 {
        BOSS_BASE_HEALTH * 2f32.powi(self.bosses_defeated as i32)
    }

    /// Apply one permanent upgrade to the player
    pub fn apply_upgrade(&mut self, kind: UpgradeKind) {
        let player = &mut self.player;
        match kind {
            UpgradeKind::FasterGun => player.bullet_speed_multiplier += UPGRADE_SPEED_STEP,
            UpgradeKind::Bazooka => player.bazooka_level += 1,
            UpgradeKind::Shoes => player.speed_multiplier += UPGRADE_SPEED_STEP,
            UpgradeKind::BulletPower => {
                // Past tier 4 the pick stays valid but does nothing
                if player.bullet_tier < MAX_BULLET_TIER {
                    player.bullet_tier += 1;
                    player.bullet_damage += UPGRADE_DAMAGE_STEP;
                }
            }
            UpgradeKind::Heart => {
                player.max_hp += 1;
                player.hp += 1;
            }
        }
        log::info!("upgrade applied: {kind:?}");
    }

    /// Post-upgrade bookkeeping: every shop visit toughens the opposition,
    /// retroactively for enemies already on the field
    pub(crate) fn close_shop(&mut self) {
        self.shop_visits += 1;
        self.enemy_base_health += 1.0;
        for enemy in &mut self.enemies {
            enemy.health += 1.0;
        }
        self.phase = GamePhase::Running;
        log::info!(
            "shop closed (visit {}), enemy base health {}",
            self.shop_visits,
            self.enemy_base_health
        );
    }

    /// Terminal transition; ticking halts until restart
    pub(crate) fn game_over(&mut self) {
        self.player.hp = self.player.hp.max(0);
        self.phase = GamePhase::GameOver;
        log::info!(
            "game over at tick {} with {} kills",
            self.time_ticks,
            self.kills
        );
    }

    /// Discard everything and re-initialize from the stored arena and seed
    pub(crate) fn restart(&mut self) {
        *self = GameState::new(self.arena, self.seed);
        log::info!("session restarted");
    }
}
