//! Ground enemies: tanks and APCs
//!
//! Both types share one update; they differ only by their `EnemyProfile` and
//! the pool they fire into.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::{ENEMY_APCS, ENEMY_TANKS};
use super::cooldown::Cooldown;
use super::pool::{PoolKind, ProjectilePool};
use crate::consts::{ENEMY_AIM_TOLERANCE_DEG, ENEMY_TURN_STEP_DEG};
use crate::tuning::{EnemyProfile, Tuning};
use crate::{bearing_yaw, wrap_degrees};

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Tank,
    Apc,
}

impl EnemyKind {
    /// Pool this type fires into
    pub fn pool(self) -> PoolKind {
        match self {
            EnemyKind::Tank => PoolKind::EnemyTank,
            EnemyKind::Apc => PoolKind::EnemyApc,
        }
    }
}

/// What an enemy did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStep {
    /// Dead, or the player is out of detection range
    Dormant,
    /// Turning toward the player
    Tracking,
    /// Within the aim tolerance; `fired` when a projectile left the muzzle
    Aligned { fired: bool },
}

/// A ground enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    pub position: Vec3,
    /// Turret heading in degrees, kept in [0, 360)
    pub yaw: f32,
    pub health: i32,
    /// Last computed bearing to the player, degrees
    pub angle_to_player: f32,
    pub cooldown: Cooldown,
    pub alive: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, profile: EnemyProfile, position: Vec3) -> Self {
        Self {
            kind,
            profile,
            position,
            yaw: profile.spawn_yaw,
            health: profile.health,
            angle_to_player: 0.0,
            cooldown: Cooldown::new(profile.fire_rate),
            alive: true,
        }
    }

    /// Advance AI by one frame
    pub fn update(
        &mut self,
        player_pos: Vec3,
        frame_scale: f32,
        pool: &mut ProjectilePool,
    ) -> AiStep {
        if !self.alive {
            return AiStep::Dormant;
        }
        if self.health <= 0 {
            self.alive = false;
            return AiStep::Dormant;
        }
        if self.position.distance(player_pos) > self.profile.detection_range {
            return AiStep::Dormant;
        }

        let desired = bearing_yaw(self.position, player_pos);
        self.angle_to_player = desired;
        let error = wrap_degrees(desired - self.yaw);

        if error.abs() > ENEMY_AIM_TOLERANCE_DEG {
            let step = (ENEMY_TURN_STEP_DEG * frame_scale).min(error.abs());
            self.yaw = (self.yaw + step.copysign(error)).rem_euclid(360.0);
            return AiStep::Tracking;
        }

        let mut fired = false;
        if self.cooldown.ready {
            let muzzle = self.position + Vec3::Y * self.profile.muzzle_height;
            if pool.fire(muzzle, self.yaw).is_some() {
                self.cooldown.trigger();
                fired = true;
            }
        }
        AiStep::Aligned { fired }
    }

    /// Apply a hit. Returns true when this hit is the lethal one.
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Authored enemy roster: tanks first, then APCs
pub fn spawn_enemies(tuning: &Tuning) -> Vec<Enemy> {
    let tanks = ENEMY_TANKS
        .iter()
        .map(|&pos| Enemy::new(EnemyKind::Tank, tuning.tank, pos));
    let apcs = ENEMY_APCS
        .iter()
        .map(|&pos| Enemy::new(EnemyKind::Apc, tuning.apc, pos));
    tanks.chain(apcs).collect()
}
