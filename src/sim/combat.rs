//! Per-frame combat resolution
//!
//! Runs after everything has moved. Passes are ordered and every projectile
//! stops at its first hit, so nothing is processed twice in a frame:
//! 1. player fire vs living enemies
//! 2. player fire vs the boss hull
//! 3. boss fire vs the player
//! 4. enemy fire vs the player
//! 5. everything vs walls and buildings

use glam::Vec3;

use super::arena::Arena;
use super::boss::Boss;
use super::bounds::spheres_overlap;
use super::enemy::Enemy;
use super::player::Player;
use super::pool::{PoolKind, ProjectilePool, Projectiles};
use super::state::{GameEvent, GameState};
use crate::consts::{ENEMY_RADIUS, MOVE_PROBE_RADIUS, PLAYER_HIT_RADIUS, PROJECTILE_RADIUS};

/// Whether a speculative hull position overlaps any wall, building or the
/// boss hull
pub fn movement_vetoed(arena: &Arena, probe: Vec3) -> bool {
    arena.blocks_movement(probe, MOVE_PROBE_RADIUS)
}

/// Resolve every projectile collision for this frame
pub fn resolve(state: &mut GameState) {
    let GameState {
        tuning,
        arena,
        player,
        enemies,
        boss,
        projectiles,
        events,
        ..
    } = state;

    for (kind, damage) in [
        (PoolKind::PlayerMain, tuning.player.main_gun_damage),
        (PoolKind::PlayerMg, tuning.player.mg_damage),
    ] {
        player_fire_vs_enemies(projectiles.pool_mut(kind), damage, enemies, events);
        player_fire_vs_boss(projectiles.pool_mut(kind), damage, arena, boss, events);
    }

    for (kind, damage) in [
        (PoolKind::BossMain, tuning.boss.main_gun_damage),
        (PoolKind::BossSpecial, tuning.boss.special_damage),
        (PoolKind::EnemyTank, tuning.tank.damage),
        (PoolKind::EnemyApc, tuning.apc.damage),
    ] {
        hostile_fire_vs_player(projectiles.pool_mut(kind), damage, player, events);
    }

    terrain_absorbs(projectiles, arena);
}

fn live_position(pool: &ProjectilePool, index: usize) -> Option<Vec3> {
    pool.get(index).filter(|p| p.fired).map(|p| p.position)
}

fn player_fire_vs_enemies(
    pool: &mut ProjectilePool,
    damage: i32,
    enemies: &mut [Enemy],
    events: &mut Vec<GameEvent>,
) {
    for slot in 0..pool.capacity() {
        let Some(pos) = live_position(pool, slot) else {
            continue;
        };

        for (index, enemy) in enemies.iter_mut().enumerate() {
            if !enemy.alive
                || !spheres_overlap(pos, PROJECTILE_RADIUS, enemy.position, ENEMY_RADIUS)
            {
                continue;
            }

            pool.deactivate(slot);
            let killed = enemy.apply_damage(damage);
            events.push(GameEvent::EnemyHit {
                index,
                kind: enemy.kind,
            });
            if killed {
                log::debug!("{:?} {} destroyed", enemy.kind, index);
                events.push(GameEvent::EnemyDestroyed {
                    index,
                    kind: enemy.kind,
                });
            }
            break;
        }
    }
}

fn player_fire_vs_boss(
    pool: &mut ProjectilePool,
    damage: i32,
    arena: &Arena,
    boss: &mut Boss,
    events: &mut Vec<GameEvent>,
) {
    for slot in 0..pool.capacity() {
        let Some(pos) = live_position(pool, slot) else {
            continue;
        };
        if !arena.boss_hull.intersects_sphere(pos, PROJECTILE_RADIUS) {
            continue;
        }

        // The hull absorbs shots even once the boss is destroyed
        pool.deactivate(slot);
        if boss.is_destroyed() {
            continue;
        }
        let destroyed = boss.apply_damage(damage);
        log::debug!("Boss hit for {damage}, {} left", boss.health);
        events.push(GameEvent::BossHit { damage });
        if destroyed {
            events.push(GameEvent::BossDestroyed);
        }
    }
}

fn hostile_fire_vs_player(
    pool: &mut ProjectilePool,
    damage: i32,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) {
    for slot in 0..pool.capacity() {
        let Some(pos) = live_position(pool, slot) else {
            continue;
        };
        if spheres_overlap(pos, PROJECTILE_RADIUS, player.position, PLAYER_HIT_RADIUS) {
            pool.deactivate(slot);
            player.health -= damage;
            events.push(GameEvent::PlayerHit {
                source: pool.kind,
                damage,
            });
        }
    }
}

fn terrain_absorbs(projectiles: &mut Projectiles, arena: &Arena) {
    for kind in PoolKind::ALL {
        let pool = projectiles.pool_mut(kind);
        for slot in 0..pool.capacity() {
            let Some(pos) = live_position(pool, slot) else {
                continue;
            };
            if arena.terrain_hit(pos, PROJECTILE_RADIUS) {
                pool.deactivate(slot);
            }
        }
    }
}
