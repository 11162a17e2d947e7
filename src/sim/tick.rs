//! Per-frame simulation step
//!
//! One call advances the whole world by the measured frame time, in a fixed
//! order: player, enemies, boss, projectiles, combat, pickups, cooldowns,
//! session, then a pending restart.

use super::combat;
use super::enemy::AiStep;
use super::pickup::{collect_pickups, spin_pickups};
use super::state::{GameEvent, GameState};
use crate::consts::{MAX_FRAME_DT, SIM_RATE};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
    /// Edge-triggered
    pub fire_main: bool,
    /// Held
    pub fire_mg: bool,
    /// Edge-triggered
    pub restart: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    // Authored speeds are per frame at the target rate
    let frame_scale = dt * SIM_RATE;
    state.frame += 1;

    if !state.session.player_dead {
        state
            .player
            .drive(input, frame_scale, &state.arena, &state.tuning.player);
        state.player.fire(
            input,
            &mut state.projectiles,
            &state.tuning.player,
            &mut state.events,
        );
    }

    let player_pos = state.player.position;
    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        let pool = state.projectiles.pool_mut(enemy.kind.pool());
        if enemy.update(player_pos, frame_scale, pool) == (AiStep::Aligned { fired: true }) {
            state.events.push(GameEvent::EnemyFired {
                index,
                kind: enemy.kind,
            });
        }
    }

    if let Some(salvo) = state.boss.update(player_pos, dt, &mut state.projectiles) {
        state.events.push(GameEvent::BossSalvo {
            main: salvo.main,
            special: salvo.special,
        });
    }

    state.projectiles.tick_all(frame_scale, player_pos);
    combat::resolve(state);

    spin_pickups(&mut state.pickups, &state.tuning.pickups, frame_scale);
    if !state.session.player_dead {
        for kind in collect_pickups(&mut state.pickups, &mut state.player, &state.tuning.pickups) {
            log::debug!("Picked up {kind:?}");
            state.events.push(GameEvent::PickupCollected { kind });
        }
    }

    state.player.tick_cooldowns(dt);
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.cooldown.tick(dt);
    }

    state.evaluate_session();

    if input.restart {
        state.reset();
    }
}
