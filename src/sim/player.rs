//! The player's tank
//!
//! Movement is probe-then-commit: a sphere is placed where the hull would go
//! and the step is vetoed outright if it overlaps anything solid.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::combat::movement_vetoed;
use super::cooldown::Cooldown;
use super::pool::{PoolKind, Projectiles};
use super::state::GameEvent;
use super::tick::TickInput;
use crate::consts::{PLAYER_SPAWN, PLAYER_SPAWN_YAW};
use crate::tuning::PlayerTuning;
use crate::yaw_to_direction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Heading in degrees, kept in [0, 360)
    pub yaw: f32,
    pub health: i32,
    pub max_health: i32,
    pub main_ammo: i32,
    pub max_main_ammo: i32,
    pub mg_ammo: i32,
    pub max_mg_ammo: i32,
    pub main_gun: Cooldown,
    pub mg: Cooldown,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            position: PLAYER_SPAWN,
            yaw: PLAYER_SPAWN_YAW,
            health: tuning.start_health,
            max_health: tuning.max_health,
            main_ammo: tuning.start_main_ammo,
            max_main_ammo: tuning.max_main_ammo,
            mg_ammo: tuning.start_mg_ammo,
            max_mg_ammo: tuning.max_mg_ammo,
            main_gun: Cooldown::new(tuning.main_gun_delay),
            mg: Cooldown::new(tuning.mg_delay),
        }
    }

    pub fn forward(&self) -> Vec3 {
        yaw_to_direction(self.yaw)
    }

    /// Turn, then try to move forward and/or backward
    pub fn drive(
        &mut self,
        input: &TickInput,
        frame_scale: f32,
        arena: &Arena,
        tuning: &PlayerTuning,
    ) {
        let turn = tuning.turn_speed * frame_scale;
        if input.turn_right {
            self.yaw -= turn;
        }
        if input.turn_left {
            self.yaw += turn;
        }
        self.yaw = self.yaw.rem_euclid(360.0);

        let step = tuning.move_speed * frame_scale;
        if input.forward {
            self.try_step(self.forward(), tuning.forward_probe, step, arena);
        }
        if input.backward {
            self.try_step(-self.forward(), tuning.backward_probe, step, arena);
        }
    }

    fn try_step(&mut self, direction: Vec3, probe_distance: f32, step: f32, arena: &Arena) {
        let probe = Vec3::new(
            self.position.x + direction.x * probe_distance,
            0.0,
            self.position.z + direction.z * probe_distance,
        );
        if movement_vetoed(arena, probe) {
            return;
        }
        self.position += direction * step;
    }

    /// Fire whichever guns the input asks for. A shot only counts (ammo,
    /// cooldown, event) when a projectile slot was actually claimed.
    pub fn fire(
        &mut self,
        input: &TickInput,
        projectiles: &mut Projectiles,
        tuning: &PlayerTuning,
        events: &mut Vec<GameEvent>,
    ) {
        if input.fire_main && self.main_gun.ready && self.main_ammo > 0 {
            let origin = self.position + tuning.main_gun_muzzle;
            if projectiles.player_main.fire(origin, self.yaw).is_some() {
                self.main_ammo -= 1;
                self.main_gun.trigger();
                events.push(GameEvent::PlayerFired {
                    weapon: PoolKind::PlayerMain,
                });
            }
        }

        if input.fire_mg && self.mg.ready && self.mg_ammo > 0 {
            let origin = self.position + tuning.mg_muzzle;
            if projectiles.player_mg.fire(origin, self.yaw).is_some() {
                self.mg_ammo -= 1;
                self.mg.trigger();
                events.push(GameEvent::PlayerFired {
                    weapon: PoolKind::PlayerMg,
                });
            }
        }
    }

    pub fn tick_cooldowns(&mut self, dt: f32) {
        self.main_gun.tick(dt);
        self.mg.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{ProjectileTuning, Tuning};

    fn setup() -> (Player, Arena, Tuning) {
        let tuning = Tuning::default();
        (Player::new(&tuning.player), Arena::new(&tuning), tuning)
    }

    #[test]
    fn test_spawn_state() {
        let (player, _, _) = setup();
        assert_eq!(player.health, 100);
        assert_eq!(player.max_health, 150);
        assert_eq!(player.main_ammo, 20);
        assert_eq!(player.mg_ammo, 150);
        assert!(player.main_gun.ready && player.mg.ready);
        // Facing into the level
        assert!((player.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_turning() {
        let (mut player, arena, tuning) = setup();
        let input = TickInput {
            turn_left: true,
            ..Default::default()
        };
        player.drive(&input, 1.0, &arena, &tuning.player);
        assert!((player.yaw - 182.5).abs() < 1e-4);

        let input = TickInput {
            turn_right: true,
            ..Default::default()
        };
        player.drive(&input, 2.0, &arena, &tuning.player);
        assert!((player.yaw - 177.5).abs() < 1e-4);
    }

    #[test]
    fn test_forward_moves_when_clear() {
        let (mut player, arena, tuning) = setup();
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        player.drive(&input, 1.0, &arena, &tuning.player);
        assert!((player.position - Vec3::new(0.0, 0.0, -0.25)).length() < 1e-5);
    }

    #[test]
    fn test_veto_on_overlap() {
        let (mut player, arena, tuning) = setup();
        // Backing toward the horizontal wall at z = 6 (face at z = 5.5)
        player.position = Vec3::new(0.0, 0.0, 2.6);
        let before = player.position;
        let input = TickInput {
            backward: true,
            ..Default::default()
        };
        player.drive(&input, 1.0, &arena, &tuning.player);
        assert_eq!(player.position, before);

        // Forward is clear
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        player.drive(&input, 1.0, &arena, &tuning.player);
        assert!(player.position.z < before.z);
    }

    #[test]
    fn test_boss_hull_vetoes_movement() {
        let (mut player, arena, tuning) = setup();
        player.position = tuning.boss.position + Vec3::new(0.0, 0.0, 11.5);
        let before = player.position;
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        player.drive(&input, 1.0, &arena, &tuning.player);
        assert_eq!(player.position, before);
    }

    #[test]
    fn test_main_gun_spends_ammo_and_gates() {
        let (mut player, _, tuning) = setup();
        let mut projectiles = Projectiles::new(&ProjectileTuning::default());
        let mut events = Vec::new();
        let input = TickInput {
            fire_main: true,
            ..Default::default()
        };

        player.fire(&input, &mut projectiles, &tuning.player, &mut events);
        assert_eq!(player.main_ammo, 19);
        assert!(!player.main_gun.ready);
        assert_eq!(projectiles.player_main.active_count(), 1);
        assert_eq!(events.len(), 1);

        // Gated until the delay passes
        player.fire(&input, &mut projectiles, &tuning.player, &mut events);
        assert_eq!(player.main_ammo, 19);
        player.tick_cooldowns(1.0);
        player.fire(&input, &mut projectiles, &tuning.player, &mut events);
        assert_eq!(player.main_ammo, 18);
    }

    #[test]
    fn test_no_fire_without_ammo() {
        let (mut player, _, tuning) = setup();
        let mut projectiles = Projectiles::new(&ProjectileTuning::default());
        let mut events = Vec::new();
        player.mg_ammo = 0;
        let input = TickInput {
            fire_mg: true,
            ..Default::default()
        };
        player.fire(&input, &mut projectiles, &tuning.player, &mut events);
        assert_eq!(projectiles.player_mg.active_count(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_saturated_pool_keeps_ammo() {
        let (mut player, _, tuning) = setup();
        let mut pools = ProjectileTuning::default();
        pools.player_mg.capacity = 1;
        let mut projectiles = Projectiles::new(&pools);
        let mut events = Vec::new();
        let input = TickInput {
            fire_mg: true,
            ..Default::default()
        };

        player.fire(&input, &mut projectiles, &tuning.player, &mut events);
        player.tick_cooldowns(0.1);
        player.fire(&input, &mut projectiles, &tuning.player, &mut events);
        assert_eq!(player.mg_ammo, 149);
        assert_eq!(events.len(), 1);
        assert!(player.mg.ready);
    }
}
