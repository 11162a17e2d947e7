//! Static arena geometry and authored placement data
//!
//! Walls and buildings are boxes stamped from one local shape per piece type
//! at authored offsets. They never move and are never destroyed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::pickup::PickupKind;
use crate::tuning::Tuning;

pub const VERTICAL_WALL_COUNT: usize = 54;
pub const HORIZONTAL_WALL_COUNT: usize = 48;
pub const BUILDING_COUNT: usize = 40;
pub const ENEMY_TANK_COUNT: usize = 20;
pub const ENEMY_APC_COUNT: usize = 15;
pub const PICKUP_COUNT: usize = 52;

/// Ground-plane point
const fn v(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

#[rustfmt::skip]
pub const VERTICAL_WALLS: [Vec3; 54] = [
    v(-25.0, 1.0), v(-25.0, -9.0), v(-25.0, -19.0),
    v(-25.0, -39.0), v(-25.0, -29.0), v(25.0, -29.0),
    v(25.0, 1.0), v(25.0, -9.0), v(25.0, -19.0),
    v(25.0, -39.0), v(25.0, -49.0), v(25.0, -59.0),
    v(25.0, -69.0), v(25.0, -79.0), v(25.0, -89.0),
    v(25.0, -99.0), v(25.0, -109.0), v(5.0, -49.0),
    v(-25.0, -59.0), v(-25.0, -69.0), v(-25.0, -79.0),
    v(-25.0, -89.0), v(-25.0, -99.0), v(5.0, -109.0),
    v(-25.0, -119.0), v(-25.0, -129.0), v(-25.0, -139.0),
    v(-25.0, -149.0), v(-25.0, -159.0), v(-25.0, -169.0),
    v(-25.0, -179.0), v(55.0, -119.0), v(55.0, -129.0),
    v(55.0, -139.0), v(55.0, -149.0), v(55.0, -159.0),
    v(55.0, -169.0), v(55.0, -179.0), v(5.0, -189.0),
    v(25.0, -189.0), v(75.0, -199.0), v(75.0, -209.0),
    v(75.0, -219.0), v(75.0, -229.0), v(75.0, -239.0),
    v(75.0, -249.0), v(75.0, -259.0), v(-45.0, -199.0),
    v(-45.0, -209.0), v(-45.0, -219.0), v(-45.0, -229.0),
    v(-45.0, -239.0), v(-45.0, -249.0), v(-45.0, -259.0),
];

#[rustfmt::skip]
pub const HORIZONTAL_WALLS: [Vec3; 48] = [
    v(-20.0, 6.0), v(-10.0, 6.0), v(0.0, 6.0),
    v(10.0, 6.0), v(20.0, 6.0), v(-20.0, -44.0),
    v(-10.0, -44.0), v(0.0, -44.0), v(-20.0, -54.0),
    v(-10.0, -54.0), v(0.0, -54.0), v(-20.0, -104.0),
    v(-10.0, -104.0), v(0.0, -104.0), v(-20.0, -114.0),
    v(-10.0, -114.0), v(0.0, -114.0), v(30.0, -114.0),
    v(40.0, -114.0), v(50.0, -114.0), v(-20.0, -184.0),
    v(-10.0, -184.0), v(30.0, -184.0), v(40.0, -184.0),
    v(50.0, -184.0), v(-40.0, -194.0), v(-30.0, -194.0),
    v(-20.0, -194.0), v(-10.0, -194.0), v(0.0, -194.0),
    v(30.0, -194.0), v(40.0, -194.0), v(50.0, -194.0),
    v(60.0, -194.0), v(70.0, -194.0), v(-40.0, -264.0),
    v(-30.0, -264.0), v(-20.0, -264.0), v(-10.0, -264.0),
    v(0.0, -264.0), v(10.0, -264.0), v(20.0, -264.0),
    v(30.0, -264.0), v(40.0, -264.0), v(50.0, -264.0),
    v(60.0, -264.0), v(70.0, -264.0), v(0.0, -184.0),
];

#[rustfmt::skip]
pub const BUILDINGS: [Vec3; 40] = [
    v(-13.0, -1.0), v(15.0, 0.0), v(-15.0, -12.0),
    v(0.0, -12.0), v(16.0, -12.0), v(-15.0, -24.0),
    v(0.0, -24.0), v(16.0, -24.0), v(-8.0, -35.0),
    v(-8.0, -36.0), v(20.0, -49.0), v(-13.0, -69.0),
    v(0.0, -72.0), v(16.0, -72.0), v(16.0, -84.0),
    v(-15.0, -84.0), v(-8.0, -95.0), v(8.0, -96.0),
    v(-13.0, -123.0), v(3.0, -132.0), v(25.0, -132.0),
    v(45.0, -130.0), v(-11.0, -144.0), v(-29.0, -150.0),
    v(45.0, -150.0), v(-12.0, -163.0), v(0.0, -173.0),
    v(18.0, -166.0), v(38.0, -167.0), v(-13.0, -1.0),
    v(30.0, -212.0), v(-13.0, -212.0), v(3.0, -212.0),
    v(25.0, -220.0), v(45.0, -210.0), v(64.0, -210.0),
    v(-30.0, -226.0), v(-11.0, -229.0), v(11.0, -229.0),
    v(29.0, -230.0),
];

#[rustfmt::skip]
pub const ENEMY_TANKS: [Vec3; 20] = [
    v(22.0, -66.0), v(9.0, -77.0), v(-4.0, -83.0),
    v(13.0, -90.0), v(-17.0, -94.0), v(2.0, -97.0),
    v(-18.0, -154.0), v(-1.0, -154.0), v(19.0, -154.0),
    v(36.0, -155.0), v(9.0, -174.0), v(29.0, -175.0),
    v(46.0, -172.0), v(-36.0, -231.0), v(-22.0, -228.0),
    v(-2.0, -229.0), v(19.0, -230.0), v(40.0, -230.0),
    v(50.0, -230.0), v(70.0, -230.0),
];

#[rustfmt::skip]
pub const ENEMY_APCS: [Vec3; 15] = [
    v(-9.0, -30.0), v(8.0, -30.0), v(21.0, -31.0),
    v(8.0, -19.0), v(-7.0, -20.0), v(8.0, -72.0),
    v(-12.0, -72.0), v(4.0, -85.0), v(35.0, -221.0),
    v(53.0, -221.0), v(70.0, -220.0), v(0.0, -220.0),
    v(-6.0, -214.0), v(-21.0, -214.0), v(-35.0, -210.0),
];

#[rustfmt::skip]
pub const BOSS_MAIN_GUN_PORTS: [Vec3; 10] = [
    v(-45.9, 12.0), v(-36.2, 12.0),
    v(-21.8, 12.0), v(-14.8, 12.0),
    v(-5.1, 12.0), v(10.6, 12.0),
    v(18.0, 12.0), v(27.7, 12.0),
    v(46.1, 12.0), v(55.8, 12.0),
];

#[rustfmt::skip]
pub const BOSS_SPECIAL_PORTS: [Vec3; 8] = [
    v(-40.3, 15.0), v(-39.3, 15.0),
    v(-9.0, 15.0), v(-8.0, 15.0),
    v(23.9, 15.0), v(24.9, 15.0),
    v(52.1, 15.0), v(53.1, 15.0),
];

pub const PICKUPS: [(PickupKind, Vec3); 52] = [
    (PickupKind::Health, v(-14.0, -7.0)),
    (PickupKind::Health, v(20.0, -44.0)),
    (PickupKind::Health, v(18.0, -78.0)),
    (PickupKind::Health, v(-12.0, -56.0)),
    (PickupKind::Health, v(-15.0, -79.0)),
    (PickupKind::Health, v(9.0, -91.0)),
    (PickupKind::Health, v(44.0, -122.0)),
    (PickupKind::Health, v(-13.0, -188.0)),
    (PickupKind::Health, v(-11.0, -139.0)),
    (PickupKind::Health, v(45.0, -144.0)),
    (PickupKind::Health, v(-11.0, -178.0)),
    (PickupKind::Health, v(37.0, -181.0)),
    (PickupKind::Health, v(66.0, -200.0)),
    (PickupKind::Health, v(-46.0, -200.0)),
    (PickupKind::Health, v(-12.0, -201.0)),
    (PickupKind::Health, v(-30.0, -203.0)),
    (PickupKind::Health, v(3.0, -202.0)),
    (PickupKind::Health, v(25.0, -202.0)),
    (PickupKind::MgAmmo, v(15.0, -6.0)),
    (PickupKind::MgAmmo, v(0.0, -6.0)),
    (PickupKind::MgAmmo, v(16.0, -18.0)),
    (PickupKind::MgAmmo, v(5.0, -42.0)),
    (PickupKind::MgAmmo, v(0.0, -67.0)),
    (PickupKind::MgAmmo, v(16.0, -67.0)),
    (PickupKind::MgAmmo, v(16.0, -67.0)),
    (PickupKind::MgAmmo, v(-7.0, -90.0)),
    (PickupKind::MgAmmo, v(3.0, -127.0)),
    (PickupKind::MgAmmo, v(25.0, -125.0)),
    (PickupKind::MgAmmo, v(44.0, -125.0)),
    (PickupKind::MgAmmo, v(29.0, -145.0)),
    (PickupKind::MgAmmo, v(1.0, -166.0)),
    (PickupKind::MgAmmo, v(38.0, -162.0)),
    (PickupKind::MgAmmo, v(25.0, -205.0)),
    (PickupKind::MgAmmo, v(2.0, -207.0)),
    (PickupKind::MgAmmo, v(-14.0, -207.0)),
    (PickupKind::MgAmmo, v(-30.0, -207.0)),
    (PickupKind::MgAmmo, v(-30.0, -220.0)),
    (PickupKind::MgAmmo, v(-11.0, -224.0)),
    (PickupKind::MgAmmo, v(11.0, -224.0)),
    (PickupKind::MgAmmo, v(29.0, -225.0)),
    (PickupKind::MgAmmo, v(46.0, -221.0)),
    (PickupKind::MgAmmo, v(63.0, -221.0)),
    (PickupKind::MgAmmo, v(64.0, -205.0)),
    (PickupKind::MgAmmo, v(45.0, -204.0)),
    (PickupKind::MainGunAmmo, v(-11.0, -134.0)),
    (PickupKind::MainGunAmmo, v(-30.0, -217.0)),
    (PickupKind::MainGunAmmo, v(-11.0, -217.0)),
    (PickupKind::MainGunAmmo, v(13.0, -219.0)),
    (PickupKind::MainGunAmmo, v(-27.0, -217.0)),
    (PickupKind::MainGunAmmo, v(-44.0, -217.0)),
    (PickupKind::MainGunAmmo, v(29.0, -219.0)),
    (PickupKind::MainGunAmmo, v(26.0, -168.0)),
];

/// World boxes for one kind of static piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySet {
    boxes: Vec<Aabb>,
}

impl GeometrySet {
    /// Stamp `local` at every offset. The offset table must hold exactly
    /// `capacity` entries.
    pub fn from_offsets(local: Aabb, offsets: &[Vec3], capacity: usize) -> Self {
        assert_eq!(
            offsets.len(),
            capacity,
            "geometry table has {} offsets, declared {}",
            offsets.len(),
            capacity
        );
        Self {
            boxes: offsets.iter().map(|&o| local.translated(o)).collect(),
        }
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// First box (index order) overlapping the sphere
    pub fn first_hit(&self, center: Vec3, radius: f32) -> Option<usize> {
        self.boxes
            .iter()
            .position(|b| b.intersects_sphere(center, radius))
    }
}

/// All immutable collision geometry of the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub horizontal_walls: GeometrySet,
    pub vertical_walls: GeometrySet,
    pub buildings: GeometrySet,
    pub boss_hull: Aabb,
}

impl Arena {
    pub fn new(tuning: &Tuning) -> Self {
        let geo = &tuning.geometry;
        Self {
            horizontal_walls: GeometrySet::from_offsets(
                geo.horizontal_wall,
                &HORIZONTAL_WALLS,
                HORIZONTAL_WALL_COUNT,
            ),
            vertical_walls: GeometrySet::from_offsets(
                geo.vertical_wall,
                &VERTICAL_WALLS,
                VERTICAL_WALL_COUNT,
            ),
            buildings: GeometrySet::from_offsets(geo.building, &BUILDINGS, BUILDING_COUNT),
            boss_hull: tuning.boss.hull.translated(tuning.boss.position),
        }
    }

    /// Terrain (walls and buildings) overlapping the sphere; the boss hull is
    /// not terrain
    pub fn terrain_hit(&self, center: Vec3, radius: f32) -> bool {
        self.horizontal_walls.first_hit(center, radius).is_some()
            || self.vertical_walls.first_hit(center, radius).is_some()
            || self.buildings.first_hit(center, radius).is_some()
    }

    /// Whether a hull sphere at `center` would overlap anything solid
    pub fn blocks_movement(&self, center: Vec3, radius: f32) -> bool {
        self.terrain_hit(center, radius) || self.boss_hull.intersects_sphere(center, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_counts() {
        let arena = Arena::new(&Tuning::default());
        assert_eq!(arena.vertical_walls.len(), VERTICAL_WALL_COUNT);
        assert_eq!(arena.horizontal_walls.len(), HORIZONTAL_WALL_COUNT);
        assert_eq!(arena.buildings.len(), BUILDING_COUNT);
        assert_eq!(PICKUPS.len(), PICKUP_COUNT);
    }

    #[test]
    fn test_box_is_local_plus_offset() {
        let tuning = Tuning::default();
        let arena = Arena::new(&tuning);
        for (i, offset) in VERTICAL_WALLS.iter().enumerate() {
            let b = arena.vertical_walls.boxes()[i];
            assert_eq!(b.min, tuning.geometry.vertical_wall.min + *offset);
            assert_eq!(b.max, tuning.geometry.vertical_wall.max + *offset);
        }
    }

    #[test]
    #[should_panic(expected = "geometry table")]
    fn test_mismatched_table_panics() {
        GeometrySet::from_offsets(Aabb::grounded(1.0, 1.0, 1.0), &BUILDINGS[..39], BUILDING_COUNT);
    }

    #[test]
    fn test_spawn_is_clear() {
        let arena = Arena::new(&Tuning::default());
        assert!(!arena.blocks_movement(crate::consts::PLAYER_SPAWN, 2.0));
    }

    #[test]
    fn test_boss_hull_blocks_but_is_not_terrain() {
        let tuning = Tuning::default();
        let arena = Arena::new(&tuning);
        let front = tuning.boss.position + Vec3::new(0.0, 0.0, 10.5);
        assert!(arena.blocks_movement(front, 1.0));
        assert!(!arena.terrain_hit(front, 1.0));
    }

    #[test]
    fn test_wall_absorbs() {
        let arena = Arena::new(&Tuning::default());
        // Horizontal segment centred at (0, 6)
        assert!(arena.terrain_hit(Vec3::new(0.0, 0.6, 5.0), 1.0));
        assert_eq!(arena.horizontal_walls.first_hit(Vec3::new(0.0, 0.6, 5.0), 1.0), Some(2));
    }
}
