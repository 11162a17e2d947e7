//! The battleship
//!
//! Stationary and always present. While alive and the player is inside its
//! engagement radius it fires every port at once, then waits out one shared
//! cooldown before the next salvo.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::{BOSS_MAIN_GUN_PORTS, BOSS_SPECIAL_PORTS};
use super::cooldown::Cooldown;
use super::pool::Projectiles;
use crate::tuning::BossTuning;

/// Heading every port fires along
const PORT_YAW: f32 = 0.0;

/// Projectiles emitted by one salvo, per weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salvo {
    pub main: usize,
    pub special: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub position: Vec3,
    pub health: i32,
    pub max_health: i32,
    pub engagement_radius: f32,
    /// Gates both weapons as one salvo
    pub cooldown: Cooldown,
}

impl Boss {
    pub fn new(tuning: &BossTuning) -> Self {
        Self {
            position: tuning.position,
            health: tuning.max_health,
            max_health: tuning.max_health,
            engagement_radius: tuning.engagement_radius,
            cooldown: Cooldown::new(tuning.fire_interval),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Remaining health in [0, 1] for the HUD bar
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn engages(&self, player_pos: Vec3) -> bool {
        self.position.distance(player_pos) <= self.engagement_radius
    }

    /// Fire if ready and advance the salvo cooldown. The cooldown only
    /// accumulates while the boss is alive and engaging.
    pub fn update(
        &mut self,
        player_pos: Vec3,
        dt: f32,
        projectiles: &mut Projectiles,
    ) -> Option<Salvo> {
        if self.is_destroyed() || !self.engages(player_pos) {
            return None;
        }

        let mut salvo = None;
        if self.cooldown.ready {
            let main = BOSS_MAIN_GUN_PORTS
                .iter()
                .filter_map(|&port| projectiles.boss_main.fire(self.position + port, PORT_YAW))
                .count();
            let special = BOSS_SPECIAL_PORTS
                .iter()
                .filter_map(|&port| {
                    projectiles
                        .boss_special
                        .fire(self.position + port, PORT_YAW)
                })
                .count();
            self.cooldown.trigger();
            salvo = Some(Salvo { main, special });
        }

        self.cooldown.tick(dt);
        salvo
    }

    /// Apply a hit. Returns true when this hit destroyed the boss.
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.health -= damage;
        self.is_destroyed()
    }
}
