//! Consumable world items

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::{PICKUP_COUNT, PICKUPS};
use super::bounds::spheres_overlap;
use super::player::Player;
use crate::consts::{PICKUP_RADIUS, PLAYER_PICKUP_RADIUS};
use crate::tuning::PickupTuning;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    MainGunAmmo,
    MgAmmo,
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec3,
    /// Cosmetic spin, degrees
    pub spin: f32,
    pub consumed: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            spin: 0.0,
            consumed: false,
        }
    }
}

/// Build the authored pickup set
pub fn spawn_pickups() -> Vec<Pickup> {
    assert_eq!(PICKUPS.len(), PICKUP_COUNT, "pickup table length mismatch");
    PICKUPS
        .iter()
        .map(|&(kind, pos)| Pickup::new(kind, pos))
        .collect()
}

/// Top up `current` by `boost` without passing `max`. Returns `None` when
/// already at the cap so the pickup stays in the world.
pub fn capped_boost(current: i32, max: i32, boost: i32) -> Option<i32> {
    if current >= max {
        return None;
    }
    Some((current + boost).min(max))
}

/// Spin live pickups
pub fn spin_pickups(pickups: &mut [Pickup], tuning: &PickupTuning, frame_scale: f32) {
    for pickup in pickups.iter_mut().filter(|p| !p.consumed) {
        pickup.spin = (pickup.spin + tuning.spin_speed * frame_scale) % 360.0;
    }
}

/// Consume every live pickup the player is touching and whose resource is
/// below its cap. Returns the kinds consumed this frame, in index order.
pub fn collect_pickups(
    pickups: &mut [Pickup],
    player: &mut Player,
    tuning: &PickupTuning,
) -> Vec<PickupKind> {
    let mut collected = Vec::new();

    for pickup in pickups.iter_mut() {
        if pickup.consumed {
            continue;
        }
        if !spheres_overlap(
            pickup.position,
            PICKUP_RADIUS,
            player.position,
            PLAYER_PICKUP_RADIUS,
        ) {
            continue;
        }

        let applied = match pickup.kind {
            PickupKind::Health => {
                capped_boost(player.health, player.max_health, tuning.health_boost)
                    .map(|v| player.health = v)
            }
            PickupKind::MainGunAmmo => {
                capped_boost(player.main_ammo, player.max_main_ammo, tuning.main_gun_boost)
                    .map(|v| player.main_ammo = v)
            }
            PickupKind::MgAmmo => {
                capped_boost(player.mg_ammo, player.max_mg_ammo, tuning.mg_boost)
                    .map(|v| player.mg_ammo = v)
            }
        };

        if applied.is_some() {
            pickup.consumed = true;
            collected.push(pickup.kind);
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::PlayerTuning;
    use proptest::prelude::*;

    fn player_at(pos: Vec3) -> Player {
        let mut p = Player::new(&PlayerTuning::default());
        p.position = pos;
        p
    }

    #[test]
    fn test_authored_mix() {
        let pickups = spawn_pickups();
        let count = |k| pickups.iter().filter(|p| p.kind == k).count();
        assert_eq!(count(PickupKind::Health), 18);
        assert_eq!(count(PickupKind::MgAmmo), 26);
        assert_eq!(count(PickupKind::MainGunAmmo), 8);
    }

    #[test]
    fn test_mg_pickup_clamps_to_max() {
        let pos = Vec3::new(3.0, 0.0, 3.0);
        let mut pickups = vec![Pickup::new(PickupKind::MgAmmo, pos)];
        let mut player = player_at(pos);
        player.mg_ammo = 280;

        let got = collect_pickups(&mut pickups, &mut player, &PickupTuning::default());
        assert_eq!(got, vec![PickupKind::MgAmmo]);
        assert_eq!(player.mg_ammo, 300);
        assert!(pickups[0].consumed);
    }

    #[test]
    fn test_health_pickup_clamps_to_max() {
        let pos = Vec3::new(-2.0, 0.0, 1.0);
        let mut pickups = vec![Pickup::new(PickupKind::Health, pos)];
        let mut player = player_at(pos);
        assert_eq!(player.health, 100);

        collect_pickups(&mut pickups, &mut player, &PickupTuning::default());
        assert_eq!(player.health, 150);
        assert!(pickups[0].consumed);
    }

    #[test]
    fn test_full_boost_when_deficit_is_large() {
        let mut pickups = vec![Pickup::new(PickupKind::MainGunAmmo, Vec3::ZERO)];
        let mut player = player_at(Vec3::ZERO);
        player.main_ammo = 5;
        collect_pickups(&mut pickups, &mut player, &PickupTuning::default());
        assert_eq!(player.main_ammo, 35);
    }

    #[test]
    fn test_at_cap_is_not_consumed() {
        let mut pickups = vec![Pickup::new(PickupKind::Health, Vec3::ZERO)];
        let mut player = player_at(Vec3::ZERO);
        player.health = player.max_health;

        let got = collect_pickups(&mut pickups, &mut player, &PickupTuning::default());
        assert!(got.is_empty());
        assert!(!pickups[0].consumed);

        // Once hurt, the same pickup is still there to take
        player.health = 10;
        let got = collect_pickups(&mut pickups, &mut player, &PickupTuning::default());
        assert_eq!(got, vec![PickupKind::Health]);
        assert_eq!(player.health, 85);
    }

    #[test]
    fn test_out_of_reach() {
        let mut pickups = vec![Pickup::new(PickupKind::Health, Vec3::new(4.1, 0.0, 0.0))];
        let mut player = player_at(Vec3::ZERO);
        assert!(collect_pickups(&mut pickups, &mut player, &PickupTuning::default()).is_empty());
    }

    #[test]
    fn test_consumed_pickups_do_not_spin() {
        let mut pickups = spawn_pickups();
        pickups[0].consumed = true;
        spin_pickups(&mut pickups, &PickupTuning::default(), 1.0);
        assert_eq!(pickups[0].spin, 0.0);
        assert_eq!(pickups[1].spin, 1.0);
    }

    proptest! {
        #[test]
        fn prop_boost_never_exceeds_max(current in -50i32..400, max in 1i32..400, boost in 0i32..200) {
            match capped_boost(current, max, boost) {
                Some(v) => {
                    prop_assert!(current < max);
                    prop_assert!(v <= max);
                    prop_assert!(v >= current);
                }
                None => prop_assert!(current >= max),
            }
        }
    }
}
