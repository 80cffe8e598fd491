//! Headless driver
//!
//! Runs the simulation at full speed with a simple autopilot, logging a JSON
//! snapshot once per simulated second. Useful for balance checks and for
//! eyeballing long runs without a front end.
//!
//! Usage: `edge-survivors [seed] [ticks] [width] [height]`

use glam::Vec2;

use edge_survivors::ArenaConfig;
use edge_survivors::consts::*;
use edge_survivors::sim::{Command, GamePhase, GameState, TickInput, UpgradeKind, tick};

/// Upgrade rotation the autopilot cycles through between bosses
const SHOP_ROTATION: [UpgradeKind; 5] = [
    UpgradeKind::Heart,
    UpgradeKind::BulletPower,
    UpgradeKind::Shoes,
    UpgradeKind::FasterGun,
    UpgradeKind::Bazooka,
];

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(42);
    let max_ticks: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(60 * 60);
    let arena = match (
        args.next().and_then(|a| a.parse().ok()),
        args.next().and_then(|a| a.parse().ok()),
    ) {
        (Some(width), Some(height)) => ArenaConfig::new(width, height),
        _ => ArenaConfig::default(),
    };

    let mut state = GameState::new(arena, seed);
    log::info!(
        "running seed {seed} for {max_ticks} ticks on a {}x{} arena",
        arena.width,
        arena.height
    );

    let snapshot_interval = ms_to_ticks(1000);
    for _ in 0..max_ticks {
        match state.phase {
            GamePhase::ShopOpen => {
                let pick = SHOP_ROTATION[state.shop_visits as usize % SHOP_ROTATION.len()];
                if let Err(err) = state.apply_command(Command::SelectUpgrade(pick)) {
                    log::error!("shop pick rejected: {err}");
                    break;
                }
            }
            GamePhase::GameOver => {
                log::info!(
                    "run ended at tick {} with {} kills on wave {}",
                    state.time_ticks,
                    state.kills,
                    state.wave
                );
                break;
            }
            GamePhase::Running => {}
        }

        let input = pilot(&state);
        tick(&mut state, &input);

        if state.time_ticks.is_multiple_of(snapshot_interval)
            && let Ok(json) = serde_json::to_string(&state.snapshot())
        {
            log::debug!("{json}");
        }
    }

    let snapshot = state.snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}

/// Dead-simple autopilot: aim at the nearest enemy, drift away from it with
/// a bias back toward the arena center.
fn pilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let player = state.player.pos;

    let nearest = state
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .total_cmp(&b.pos.distance_squared(player))
        })
        .map(|enemy| enemy.pos);

    if let Some(threat) = nearest {
        let to_threat = threat - player;
        input.aim_right = to_threat.x > 0.0;
        input.aim_left = to_threat.x < 0.0;
        input.aim_down = to_threat.y > 0.0;
        input.aim_up = to_threat.y < 0.0;

        // Retreat, leaning toward center so the pilot never corners itself
        let retreat = (player - threat).normalize_or_zero()
            + (state.arena.center() - player).normalize_or_zero() * 0.5;
        input.move_right = retreat.x > 0.25;
        input.move_left = retreat.x < -0.25;
        input.move_down = retreat.y > 0.25;
        input.move_up = retreat.y < -0.25;
    } else {
        // Nothing on the field: recenter
        let home = state.arena.center() - player;
        if home != Vec2::ZERO {
            input.move_right = home.x > PLAYER_SPEED;
            input.move_left = home.x < -PLAYER_SPEED;
            input.move_down = home.y > PLAYER_SPEED;
            input.move_up = home.y < -PLAYER_SPEED;
        }
    }

    input
}
