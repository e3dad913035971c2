//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::bodies_collide;
use super::state::{GameEvent, GamePhase, GameState, Rock};
use crate::settings::Settings;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn counter-clockwise
    pub turn_left: bool,
    /// Turn clockwise
    pub turn_right: bool,
    pub thrust_forward: bool,
    pub thrust_back: bool,
    /// Fire if the weapon is ready
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, settings: &Settings) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Terminal phases are frozen
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.grace_left -= dt;

    // Ship
    state.ship.move_by(dt, input, &settings.ship);
    if let Some(projectile) = state
        .ship
        .shoot(dt, input.fire, &settings.ship, &settings.projectile)
    {
        state.projectiles.push(projectile);
        events.push(GameEvent::Fired);
    }

    for rock in &mut state.rocks {
        rock.move_by(dt);
    }
    for projectile in &mut state.projectiles {
        projectile.move_by(dt);
    }

    resolve_projectile_hits(state, settings, &mut events);

    if !state.is_invincible() {
        if let Some(rock_id) = ship_hit(state, settings.seam_collisions) {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::ShipDestroyed { rock_id });
            log::info!(
                "Ship destroyed by rock {} after {} ticks",
                rock_id,
                state.time_ticks
            );
        }
    }

    state.projectiles.retain(|p| !p.is_dead());

    if state.phase == GamePhase::Playing && state.rocks.is_empty() {
        state.phase = GamePhase::Cleared;
        events.push(GameEvent::FieldCleared);
        log::info!("Field cleared after {} ticks", state.time_ticks);
    }

    events
}

/// Each live projectile consumes at most one rock, the first it overlaps in
/// list order. Fragments join the field only after every projectile has been
/// tested.
fn resolve_projectile_hits(state: &mut GameState, settings: &Settings, events: &mut Vec<GameEvent>) {
    let seams = settings.seam_collisions;
    let mut fragments: Vec<(u32, Vec<Rock>)> = Vec::new();

    for projectile in state.projectiles.iter_mut() {
        if projectile.is_dead() {
            continue;
        }
        let hit = state
            .rocks
            .iter()
            .position(|rock| bodies_collide(&*projectile, rock, seams));
        let Some(index) = hit else {
            continue;
        };

        projectile.kill();
        let rock = state.rocks.remove(index);
        let children = rock
            .split(&mut state.rng, &settings.split, &settings.generator)
            .into_rocks();
        fragments.push((rock.id, children));
    }

    for (rock_id, children) in fragments {
        let mut ids = Vec::with_capacity(children.len());
        for mut child in children {
            child.id = state.next_entity_id();
            ids.push(child.id);
            state.rocks.push(child);
        }
        log::debug!("Rock {} split into {:?}", rock_id, ids);
        events.push(GameEvent::RockSplit {
            rock_id,
            children: ids,
        });
    }
}

fn ship_hit(state: &GameState, seams: bool) -> Option<u32> {
    state
        .rocks
        .iter()
        .find(|rock| bodies_collide(&state.ship, *rock, seams))
        .map(|rock| rock.id)
}
