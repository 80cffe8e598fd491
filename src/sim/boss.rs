//! Boss behavior and the special-attack state machine
//!
//! Specials run in two steps: the boss telegraphs, then the attack lands
//! after a delay. Delays are modeled as a queue of `(fire_tick, boss_id,
//! action)` entries drained once per tick, never as blocking waits. An entry
//! re-validates at fire time that a boss with that exact id is still alive;
//! a stale entry is a silent no-op.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Enemy, EnemyKind, GameState, Projectile, ProjectileOwner};

/// Where a boss is in its special-attack cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialPhase {
    Idle,
    /// Warning shown; the scheduled attack clears it when it lands
    Telegraphing,
}

/// Per-boss state; only bosses carry this
#[derive(Debug, Clone, PartialEq)]
pub struct BossState {
    /// Capability level: tier 1 adds the rush attack, tier 2 adds the summon
    pub tier: u32,
    pub special: SpecialPhase,
    pub last_shot_tick: u64,
    pub last_special_tick: u64,
}

impl BossState {
    pub fn new(tier: u32, now: u64) -> Self {
        Self {
            tier,
            special: SpecialPhase::Idle,
            last_shot_tick: now,
            last_special_tick: now,
        }
    }
}

/// A delayed special attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAction {
    /// Teleport to screen center and fire in all 8 compass directions
    Rush,
    /// Spawn a grunt next to the boss
    Summon,
}

/// A boss action waiting to fire, checked against the live registry on firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    pub fire_tick: u64,
    pub boss_id: u32,
    pub action: BossAction,
}

/// The 8 compass directions a rush attack fires along
pub const COMPASS_DIRS: [Vec2; 8] = [
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-1.0, -1.0),
];

/// Advance all boss behavior for this tick: the aimed shot, special-attack
/// scheduling, and any delayed actions that have come due.
pub fn run_bosses(state: &mut GameState) {
    let now = state.time_ticks;

    if let Some(boss_id) = state.boss_id {
        aimed_shot(state, boss_id, now);
        schedule_specials(state, boss_id, now);
    }

    // Drain due actions in insertion order; stale ones no-op inside
    let mut due = Vec::new();
    state.scheduled.retain(|action| {
        if action.fire_tick <= now {
            due.push(*action);
            false
        } else {
            true
        }
    });
    for entry in due {
        match entry.action {
            BossAction::Rush => fire_rush(state, entry.boss_id),
            BossAction::Summon => fire_summon(state, entry.boss_id),
        }
    }
}

/// Regular ranged attack: a shot at the player every couple of seconds,
/// independent of the special cycle.
fn aimed_shot(state: &mut GameState, boss_id: u32, now: u64) {
    let player_pos = state.player.pos;
    let mut shot = None;
    if let Some(enemy) = state.enemy_mut(boss_id)
        && let EnemyKind::Boss(boss) = &mut enemy.kind
        && now.saturating_sub(boss.last_shot_tick) >= ms_to_ticks(BOSS_SHOOT_COOLDOWN_MS)
    {
        let dir = (player_pos - enemy.pos).normalize_or_zero();
        // A boss sitting exactly on the player holds fire and retries
        if dir != Vec2::ZERO {
            boss.last_shot_tick = now;
            shot = Some((enemy.pos, dir));
        }
    }
    if let Some((pos, dir)) = shot {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel: dir * BOSS_SHOT_SPEED,
            owner: ProjectileOwner::Enemy,
        });
    }
}

/// Begin a special cycle when the cooldown has elapsed and the boss is idle.
fn schedule_specials(state: &mut GameState, boss_id: u32, now: u64) {
    let Some(enemy) = state.enemy_mut(boss_id) else {
        return;
    };
    let EnemyKind::Boss(boss) = &mut enemy.kind else {
        return;
    };
    if boss.special != SpecialPhase::Idle
        || now.saturating_sub(boss.last_special_tick) < ms_to_ticks(BOSS_SPECIAL_COOLDOWN_MS)
    {
        return;
    }

    let mut rush_scheduled = false;
    if boss.tier >= 1 {
        boss.special = SpecialPhase::Telegraphing;
        // The special clock restarts when the telegraph begins, not when the
        // rush lands
        boss.last_special_tick = now;
        rush_scheduled = true;
    }
    let tier = boss.tier;

    if rush_scheduled {
        state.scheduled.push(ScheduledAction {
            fire_tick: now + ms_to_ticks(TELEGRAPH_MS),
            boss_id,
            action: BossAction::Rush,
        });
        log::debug!("boss {boss_id} telegraphing rush at tick {now}");
    }
    if tier >= 2 {
        // Trails the rush by two seconds; immediate if no rush this cycle
        let delay = if rush_scheduled {
            ms_to_ticks(TELEGRAPH_MS) + ms_to_ticks(SUMMON_DELAY_MS)
        } else {
            0
        };
        state.scheduled.push(ScheduledAction {
            fire_tick: now + delay,
            boss_id,
            action: BossAction::Summon,
        });
    }
}

/// Rush: teleport to screen center and spray all 8 compass directions.
fn fire_rush(state: &mut GameState, boss_id: u32) {
    let center = state.arena.center();
    // The boss may have died while the telegraph ran
    let Some(enemy) = state.enemy_mut(boss_id) else {
        return;
    };
    let EnemyKind::Boss(boss) = &mut enemy.kind else {
        return;
    };
    boss.special = SpecialPhase::Idle;
    enemy.pos = center;
    log::debug!("boss {boss_id} rush attack");

    for dir in COMPASS_DIRS {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: center,
            vel: dir.normalize() * RUSH_SHOT_SPEED,
            owner: ProjectileOwner::Enemy,
        });
    }
}

/// Summon: drop a fresh grunt next to the boss, clamped to stay on screen.
fn fire_summon(state: &mut GameState, boss_id: u32) {
    let arena = state.arena;
    let Some(enemy) = state.enemy_mut(boss_id) else {
        return;
    };
    let EnemyKind::Boss(boss) = &mut enemy.kind else {
        return;
    };
    boss.special = SpecialPhase::Idle;
    let boss_pos = enemy.pos;

    let dx = if state.rng.random_bool(0.5) {
        SUMMON_OFFSET
    } else {
        -SUMMON_OFFSET
    };
    let dy = if state.rng.random_bool(0.5) {
        SUMMON_OFFSET
    } else {
        -SUMMON_OFFSET
    };
    let pos = arena.clamp_inset(boss_pos + Vec2::new(dx, dy), SPAWN_INSET);
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        health: SUMMON_HEALTH,
        kind: EnemyKind::Grunt,
    });
    log::debug!("boss {boss_id} summoned grunt {id}");
}
