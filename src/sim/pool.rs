//! Fixed-capacity projectile pools
//!
//! Every pool is allocated once at startup. Firing claims the first idle slot
//! in index order; a full pool simply drops the shot. Slots are never freed,
//! only released back to idle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::{ProjectileSpec, ProjectileTuning};
use crate::yaw_to_direction;

/// A reusable slot with an active flag
pub trait PoolSlot {
    fn is_active(&self) -> bool;
    fn release(&mut self);
}

/// First-fit pool over pre-allocated slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPool<T> {
    slots: Vec<T>,
}

impl<T: PoolSlot + Clone> SlotPool<T> {
    /// Allocate `capacity` copies of an idle template slot
    pub fn new(capacity: usize, idle: T) -> Self {
        assert!(capacity > 0, "pool capacity must be positive");
        assert!(!idle.is_active(), "pool template slot must be idle");
        Self {
            slots: vec![idle; capacity],
        }
    }
}

impl<T: PoolSlot> SlotPool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// First idle slot in index order, if any
    pub fn claim(&mut self) -> Option<(usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| !s.is_active())
    }

    /// Return a slot to idle. Releasing an idle slot is a no-op.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.release();
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_active())
    }
}

/// Which weapon a pool belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    PlayerMain,
    PlayerMg,
    EnemyTank,
    EnemyApc,
    BossMain,
    BossSpecial,
}

impl PoolKind {
    pub const ALL: [PoolKind; 6] = [
        PoolKind::PlayerMain,
        PoolKind::PlayerMg,
        PoolKind::EnemyTank,
        PoolKind::EnemyApc,
        PoolKind::BossMain,
        PoolKind::BossSpecial,
    ];
}

/// One projectile slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    /// Unit heading, always derived from `yaw`
    pub direction: Vec3,
    /// Heading in degrees
    pub yaw: f32,
    /// World units per frame
    pub speed: f32,
    pub max_range: f32,
    pub fired: bool,
}

impl Projectile {
    fn idle(spec: &ProjectileSpec) -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            yaw: 0.0,
            speed: spec.speed,
            max_range: spec.max_range,
            fired: false,
        }
    }
}

impl PoolSlot for Projectile {
    fn is_active(&self) -> bool {
        self.fired
    }

    fn release(&mut self) {
        self.fired = false;
    }
}

/// Projectile slots for one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePool {
    pub kind: PoolKind,
    slots: SlotPool<Projectile>,
}

impl ProjectilePool {
    pub fn new(kind: PoolKind, spec: &ProjectileSpec) -> Self {
        Self {
            kind,
            slots: SlotPool::new(spec.capacity, Projectile::idle(spec)),
        }
    }

    /// Launch from `origin` heading along `yaw`. Returns the claimed slot, or
    /// `None` when the pool is saturated and the shot is dropped.
    pub fn fire(&mut self, origin: Vec3, yaw: f32) -> Option<usize> {
        let (index, slot) = self.slots.claim()?;
        slot.position = origin;
        slot.yaw = yaw;
        slot.direction = yaw_to_direction(yaw);
        slot.fired = true;
        Some(index)
    }

    /// Advance every live projectile and expire those at or beyond their
    /// range from `anchor`. `frame_scale` is `dt` in target-rate frames.
    pub fn tick(&mut self, frame_scale: f32, anchor: Vec3) {
        for (_, p) in self.slots.iter_active_mut() {
            p.position += p.direction * p.speed * frame_scale;
            if p.position.distance(anchor) >= p.max_range {
                p.fired = false;
            }
        }
    }

    /// Retire a projectile after a hit; idempotent
    pub fn deactivate(&mut self, index: usize) {
        self.slots.release(index);
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn active_count(&self) -> usize {
        self.slots.active_count()
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.slots.get(index)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots.iter_active()
    }
}

/// The six pools of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectiles {
    pub player_main: ProjectilePool,
    pub player_mg: ProjectilePool,
    pub enemy_tank: ProjectilePool,
    pub enemy_apc: ProjectilePool,
    pub boss_main: ProjectilePool,
    pub boss_special: ProjectilePool,
}

impl Projectiles {
    pub fn new(tuning: &ProjectileTuning) -> Self {
        Self {
            player_main: ProjectilePool::new(PoolKind::PlayerMain, &tuning.player_main),
            player_mg: ProjectilePool::new(PoolKind::PlayerMg, &tuning.player_mg),
            enemy_tank: ProjectilePool::new(PoolKind::EnemyTank, &tuning.enemy_tank),
            enemy_apc: ProjectilePool::new(PoolKind::EnemyApc, &tuning.enemy_apc),
            boss_main: ProjectilePool::new(PoolKind::BossMain, &tuning.boss_main),
            boss_special: ProjectilePool::new(PoolKind::BossSpecial, &tuning.boss_special),
        }
    }

    pub fn pool(&self, kind: PoolKind) -> &ProjectilePool {
        match kind {
            PoolKind::PlayerMain => &self.player_main,
            PoolKind::PlayerMg => &self.player_mg,
            PoolKind::EnemyTank => &self.enemy_tank,
            PoolKind::EnemyApc => &self.enemy_apc,
            PoolKind::BossMain => &self.boss_main,
            PoolKind::BossSpecial => &self.boss_special,
        }
    }

    pub fn pool_mut(&mut self, kind: PoolKind) -> &mut ProjectilePool {
        match kind {
            PoolKind::PlayerMain => &mut self.player_main,
            PoolKind::PlayerMg => &mut self.player_mg,
            PoolKind::EnemyTank => &mut self.enemy_tank,
            PoolKind::EnemyApc => &mut self.enemy_apc,
            PoolKind::BossMain => &mut self.boss_main,
            PoolKind::BossSpecial => &mut self.boss_special,
        }
    }

    pub fn tick_all(&mut self, frame_scale: f32, anchor: Vec3) {
        for kind in PoolKind::ALL {
            self.pool_mut(kind).tick(frame_scale, anchor);
        }
    }

    pub fn active_count(&self) -> usize {
        PoolKind::ALL
            .iter()
            .map(|&k| self.pool(k).active_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool(capacity: usize, range: f32) -> ProjectilePool {
        ProjectilePool::new(PoolKind::PlayerMg, &ProjectileSpec::new(capacity, 1.0, range))
    }

    #[test]
    fn test_fire_is_first_fit() {
        let mut p = pool(4, 100.0);
        assert_eq!(p.fire(Vec3::ZERO, 0.0), Some(0));
        assert_eq!(p.fire(Vec3::ZERO, 0.0), Some(1));
        assert_eq!(p.fire(Vec3::ZERO, 0.0), Some(2));
        p.deactivate(1);
        assert_eq!(p.fire(Vec3::ZERO, 90.0), Some(1));
        let slot = p.get(1).unwrap();
        assert!((slot.direction - Vec3::X).length() < 1e-5);
        assert_eq!(slot.yaw, 90.0);
    }

    #[test]
    fn test_saturated_pool_drops_shot() {
        let mut p = pool(2, 100.0);
        assert!(p.fire(Vec3::ZERO, 0.0).is_some());
        assert!(p.fire(Vec3::ZERO, 0.0).is_some());
        assert_eq!(p.fire(Vec3::ZERO, 0.0), None);
        assert_eq!(p.active_count(), 2);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut p = pool(2, 100.0);
        p.fire(Vec3::ZERO, 0.0);
        p.deactivate(0);
        p.deactivate(0);
        p.deactivate(7);
        assert_eq!(p.active_count(), 0);
    }

    #[test]
    fn test_motion_follows_yaw() {
        let mut p = pool(1, 100.0);
        p.fire(Vec3::new(1.0, 0.5, 1.0), 180.0);
        p.tick(1.0, Vec3::ZERO);
        p.tick(1.0, Vec3::ZERO);
        let pos = p.get(0).unwrap().position;
        assert!((pos - Vec3::new(1.0, 0.5, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_range_expiry_is_inclusive() {
        let mut p = pool(1, 3.0);
        p.fire(Vec3::ZERO, 0.0);
        p.tick(1.0, Vec3::ZERO);
        p.tick(1.0, Vec3::ZERO);
        assert_eq!(p.active_count(), 1);
        // Third step lands exactly on the range boundary
        p.tick(1.0, Vec3::ZERO);
        assert_eq!(p.active_count(), 0);
    }

    #[test]
    fn test_range_anchor_follows_reference() {
        let mut p = pool(1, 5.0);
        p.fire(Vec3::ZERO, 0.0);
        // Anchor far away: projectile expires on its first step
        p.tick(1.0, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(p.active_count(), 0);
    }

    #[test]
    fn test_projectiles_count_across_pools() {
        let mut all = Projectiles::new(&ProjectileTuning::default());
        all.boss_main.fire(Vec3::ZERO, 0.0);
        all.player_mg.fire(Vec3::ZERO, 0.0);
        assert_eq!(all.active_count(), 2);
        assert_eq!(all.pool(PoolKind::EnemyApc).capacity(), 70);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(
            capacity in 1usize..40,
            ops in proptest::collection::vec((any::<bool>(), 0usize..48), 0..200),
        ) {
            let mut p = pool(capacity, 1000.0);
            for (fire, index) in ops {
                let before = p.active_count();
                if fire {
                    let claimed = p.fire(Vec3::ZERO, 0.0);
                    if before == capacity {
                        prop_assert!(claimed.is_none());
                        prop_assert_eq!(p.active_count(), capacity);
                    } else {
                        prop_assert_eq!(p.active_count(), before + 1);
                    }
                } else {
                    p.deactivate(index);
                }
                prop_assert!(p.active_count() <= capacity);
            }
        }

        #[test]
        fn prop_expires_on_first_step_reaching_range(range in 1.5f32..60.0, yaw in 0.0f32..360.0) {
            let mut p = pool(1, range);
            p.fire(Vec3::ZERO, yaw);
            let mut steps = 0u32;
            while p.active_count() == 1 {
                p.tick(1.0, Vec3::ZERO);
                steps += 1;
                prop_assert!(steps < 1000);
            }
            // Unit speed: expiry on the first step whose distance reaches the range
            let travelled = steps as f32;
            prop_assert!(travelled >= range - 1e-3);
            prop_assert!(travelled - 1.0 < range + 1e-3);
        }
    }
}
