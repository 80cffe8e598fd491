//! Discrete control-surface commands
//!
//! Everything that is not held input arrives as a command. Commands are
//! phase-gated; a rejected command leaves the state untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::state::{GamePhase, GameState, UpgradeKind};

/// A discrete action applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Pick a shop upgrade and resume the run
    SelectUpgrade(UpgradeKind),
    /// Throw the session away and start over with the same seed
    Restart,
    /// Debug helper: credit extra kills toward wave and boss thresholds
    AddKills(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("upgrade selection requires an open shop")]
    ShopNotOpen,
    #[error("restart requires a finished run")]
    NotGameOver,
    #[error("command requires a running simulation")]
    NotRunning,
}

impl GameState {
    /// Apply one command, enforcing the phase it is valid in.
    pub fn apply_command(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::SelectUpgrade(kind) => {
                if self.phase != GamePhase::ShopOpen {
                    return Err(CommandError::ShopNotOpen);
                }
                self.apply_upgrade(kind);
                self.close_shop();
                Ok(())
            }
            Command::Restart => {
                if self.phase != GamePhase::GameOver {
                    return Err(CommandError::NotGameOver);
                }
                self.restart();
                Ok(())
            }
            Command::AddKills(count) => {
                if self.phase != GamePhase::Running {
                    return Err(CommandError::NotRunning);
                }
                self.kills += count;
                self.kills_this_wave += count;
                log::info!("debug kill credit +{count} ({} total)", self.kills);
                Ok(())
            }
        }
    }
}
