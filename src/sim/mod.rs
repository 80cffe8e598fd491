//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entities kept in id order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod command;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use boss::{BossAction, BossState, COMPASS_DIRS, ScheduledAction, SpecialPhase};
pub use command::{Command, CommandError};
pub use snapshot::{EnemySnapshot, PlayerSnapshot, ProjectileSnapshot, Snapshot};
pub use state::{
    Enemy, EnemyKind, GamePhase, GameState, Player, Projectile, ProjectileOwner, UpgradeKind,
};
pub use tick::{TickInput, tick};
