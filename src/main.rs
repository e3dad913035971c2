//! Rocksplit headless driver
//!
//! Runs a seeded game with a simple autopilot and logs how it went.
//! Usage: `rocksplit [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use rocksplit::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use rocksplit::sim::{GameEvent, GamePhase, GameState, TickInput, VecGen, tick};
#[cfg(not(target_arch = "wasm32"))]
use rocksplit::Settings;

/// Give up after this many ticks (five minutes of game time)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 20_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rocksplit (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    let mut state = GameState::new(seed, &settings);
    let mut pilot = VecGen::new(seed.wrapping_add(1));
    let mut shots = 0u32;
    let mut splits = 0u32;

    while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
        let input = autopilot(&state, &mut pilot);
        for event in tick(&mut state, &input, SIM_DT, &settings) {
            match event {
                GameEvent::Fired => shots += 1,
                GameEvent::RockSplit { .. } => splits += 1,
                _ => {}
            }
        }
    }

    let seconds = state.time_ticks as f32 * SIM_DT;
    match state.phase {
        GamePhase::Cleared => log::info!("Field cleared in {:.1}s", seconds),
        GamePhase::GameOver => log::info!("Game over after {:.1}s", seconds),
        GamePhase::Playing => log::info!("Stopped after {:.1}s", seconds),
    }
    log::info!(
        "seed {}: {} shots, {} rocks hit, {} left",
        seed,
        shots,
        splits,
        state.rocks.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver in the browser
}

/// Turn toward the first rock and keep firing, with the odd burst of thrust
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState, pilot: &mut VecGen) -> TickInput {
    let ship = &state.ship;
    let mut input = TickInput {
        fire: true,
        thrust_forward: pilot.unit() < 0.1,
        ..Default::default()
    };

    if let Some(rock) = state.rocks.first() {
        let to_rock = rock.transform.position - ship.transform.position;
        let side = ship.direction.perp_dot(to_rock);
        input.turn_left = side > 0.0;
        input.turn_right = side < 0.0;
    }

    input
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
