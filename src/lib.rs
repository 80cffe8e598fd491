//! Edge Survivors - a tick-driven arcade survival simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, combat, bosses, progression)
//! - `config`: Arena dimensions supplied by the host at session start
//!
//! The crate is headless. A host drives it by calling [`sim::tick`] at a fixed
//! rate with the currently-held input flags, dispatches discrete commands
//! through [`sim::GameState::apply_command`], and reads a serializable
//! [`sim::Snapshot`] back each tick. Rendering, windowing, and key binding
//! live entirely on the host side.

pub mod config;
pub mod sim;

pub use config::ArenaConfig;

/// Game tuning constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;

    /// Convert a cooldown in milliseconds to whole ticks (rounding up)
    pub const fn ms_to_ticks(ms: u64) -> u64 {
        ms.div_ceil(TICK_MS)
    }

    /// Player base movement speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Enemy base movement speed (half the player's)
    pub const ENEMY_SPEED: f32 = PLAYER_SPEED / 2.0;
    /// Effective enemy speed never exceeds this fraction of player speed
    pub const ENEMY_SPEED_CAP: f32 = 0.8;

    /// Player bullet base speed
    pub const BULLET_SPEED: f32 = 8.0;
    /// Boss aimed-shot speed
    pub const BOSS_SHOT_SPEED: f32 = 6.0;
    /// Rush-attack projectile speed
    pub const RUSH_SHOT_SPEED: f32 = 10.0;

    /// Auto-fire cooldown
    pub const SHOOT_COOLDOWN_MS: u64 = 200;
    /// Grunt spawn cadence
    pub const SPAWN_COOLDOWN_MS: u64 = 2000;
    /// Boss aimed-shot cadence
    pub const BOSS_SHOOT_COOLDOWN_MS: u64 = 2000;
    /// Boss special-attack cadence
    pub const BOSS_SPECIAL_COOLDOWN_MS: u64 = 10_000;
    /// Telegraph duration before a rush lands
    pub const TELEGRAPH_MS: u64 = 1000;
    /// Extra delay of a summon behind a scheduled rush
    pub const SUMMON_DELAY_MS: u64 = 2000;

    /// Kills needed to advance a wave
    pub const WAVE_KILLS: u32 = 10;
    /// A boss spawns at every positive multiple of this kill count
    pub const BOSS_KILL_INTERVAL: u32 = 30;
    /// First boss health; doubles for each boss defeated
    pub const BOSS_BASE_HEALTH: f32 = 50.0;
    /// Health of a boss-summoned grunt
    pub const SUMMON_HEALTH: f32 = 3.0;

    /// Player-bullet hit radius against a grunt
    pub const GRUNT_HIT_RADIUS: f32 = 28.0;
    /// Player-bullet hit radius against a boss
    pub const BOSS_HIT_RADIUS: f32 = 48.0;
    /// Body-contact radius of a grunt against the player
    pub const GRUNT_CONTACT_RADIUS: f32 = 45.0;
    /// Body-contact radius of a boss against the player
    pub const BOSS_CONTACT_RADIUS: f32 = 65.0;
    /// Enemy-projectile hit radius against the player
    pub const ENEMY_SHOT_HIT_RADIUS: f32 = 33.0;

    /// Edge inset for grunt spawn points and summon clamping
    pub const SPAWN_INSET: f32 = 50.0;
    /// Edge inset for boss spawn points
    pub const BOSS_SPAWN_INSET: f32 = 100.0;
    /// Per-axis offset of a summoned grunt from its boss
    pub const SUMMON_OFFSET: f32 = 100.0;

    /// Multiplier step granted by FasterGun / Shoes
    pub const UPGRADE_SPEED_STEP: f32 = 0.5;
    /// Damage step granted by BulletPower
    pub const UPGRADE_DAMAGE_STEP: f32 = 0.5;
    /// Enemy speed-multiplier step per wave
    pub const WAVE_SPEED_STEP: f32 = 0.1;
    /// Highest bullet color tier
    pub const MAX_BULLET_TIER: u8 = 4;
}
