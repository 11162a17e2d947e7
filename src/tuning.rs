//! Gameplay balance
//!
//! Every number the simulation uses to decide damage, ranges, rates and
//! capacities lives here. `Tuning::default()` is the authored balance; a JSON
//! file can override any subset of it.

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::bounds::Aabb;

/// Failure loading a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(err) => write!(f, "cannot read tuning file: {err}"),
            TuningError::Parse(err) => write!(f, "malformed tuning file: {err}"),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(err) => Some(err),
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Capacity and flight parameters of one projectile pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Number of pre-allocated slots
    pub capacity: usize,
    /// World units per frame at the target rate
    pub speed: f32,
    /// Distance from the range anchor at which the projectile expires
    pub max_range: f32,
}

impl ProjectileSpec {
    pub const fn new(capacity: usize, speed: f32, max_range: f32) -> Self {
        Self {
            capacity,
            speed,
            max_range,
        }
    }
}

/// The six projectile pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub player_main: ProjectileSpec,
    pub player_mg: ProjectileSpec,
    pub enemy_tank: ProjectileSpec,
    pub enemy_apc: ProjectileSpec,
    pub boss_main: ProjectileSpec,
    pub boss_special: ProjectileSpec,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            player_main: ProjectileSpec::new(20, 1.0, 100.0),
            player_mg: ProjectileSpec::new(70, 1.0, 100.0),
            enemy_tank: ProjectileSpec::new(30, 1.0, 20.0),
            enemy_apc: ProjectileSpec::new(70, 1.0, 100.0),
            boss_main: ProjectileSpec::new(30, 1.0, 20.0),
            boss_special: ProjectileSpec::new(30, 1.0, 20.0),
        }
    }
}

/// Player tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// World units per frame
    pub move_speed: f32,
    /// Degrees per frame
    pub turn_speed: f32,
    /// Distance ahead of the hull tested before moving forward
    pub forward_probe: f32,
    /// Distance behind the hull tested before reversing
    pub backward_probe: f32,
    pub max_health: i32,
    pub start_health: i32,
    pub max_main_ammo: i32,
    pub start_main_ammo: i32,
    pub max_mg_ammo: i32,
    pub start_mg_ammo: i32,
    /// Seconds between main gun shots
    pub main_gun_delay: f32,
    /// Seconds between machine gun rounds
    pub mg_delay: f32,
    pub main_gun_damage: i32,
    pub mg_damage: i32,
    /// Muzzle offsets from the hull origin
    pub main_gun_muzzle: Vec3,
    pub mg_muzzle: Vec3,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 0.25,
            turn_speed: 2.5,
            forward_probe: 1.0,
            backward_probe: 2.0,
            max_health: 150,
            start_health: 100,
            max_main_ammo: 50,
            start_main_ammo: 20,
            max_mg_ammo: 300,
            start_mg_ammo: 150,
            main_gun_delay: 1.0,
            mg_delay: 0.1,
            main_gun_damage: 45,
            mg_damage: 15,
            main_gun_muzzle: Vec3::new(0.0, 0.6, 0.2),
            mg_muzzle: Vec3::new(-0.1, 0.9, 0.1),
        }
    }
}

/// Per-type constants for ground enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub health: i32,
    /// Player distance at which the enemy wakes up
    pub detection_range: f32,
    /// Minimum seconds between shots
    pub fire_rate: f32,
    /// Damage one of its projectiles deals to the player
    pub damage: i32,
    pub muzzle_height: f32,
    pub spawn_yaw: f32,
}

impl EnemyProfile {
    pub const TANK: Self = Self {
        health: 60,
        detection_range: 25.0,
        fire_rate: 2.0,
        damage: 10,
        muzzle_height: 0.5,
        spawn_yaw: 180.0,
    };

    pub const APC: Self = Self {
        health: 30,
        detection_range: 15.0,
        fire_rate: 0.125,
        damage: 1,
        muzzle_height: 0.5,
        spawn_yaw: 180.0,
    };
}

/// Stationary battleship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub position: Vec3,
    pub max_health: i32,
    /// Player distance within which the boss fires
    pub engagement_radius: f32,
    /// Seconds between salvos
    pub fire_interval: f32,
    pub main_gun_damage: i32,
    pub special_damage: i32,
    /// Hull bounds relative to `position`
    pub hull: Aabb,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            position: Vec3::new(15.0, 0.0, -251.0),
            max_health: 500,
            engagement_radius: 60.0,
            fire_interval: 1.0,
            main_gun_damage: 10,
            special_damage: 50,
            hull: Aabb::new(Vec3::new(-50.0, 0.0, -10.0), Vec3::new(60.0, 8.0, 10.0)),
        }
    }
}

/// Consumable boosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub health_boost: i32,
    pub main_gun_boost: i32,
    pub mg_boost: i32,
    /// Cosmetic spin, degrees per frame
    pub spin_speed: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            health_boost: 75,
            main_gun_boost: 30,
            mg_boost: 60,
            spin_speed: 1.0,
        }
    }
}

/// Local bounds shared by every instance of a static piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryTuning {
    pub vertical_wall: Aabb,
    pub horizontal_wall: Aabb,
    pub building: Aabb,
}

impl Default for GeometryTuning {
    fn default() -> Self {
        Self {
            vertical_wall: Aabb::grounded(0.5, 3.0, 5.0),
            horizontal_wall: Aabb::grounded(5.0, 3.0, 0.5),
            building: Aabb::grounded(4.0, 6.0, 4.0),
        }
    }
}

/// Complete gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub tank: EnemyProfile,
    pub apc: EnemyProfile,
    pub boss: BossTuning,
    pub pickups: PickupTuning,
    pub geometry: GeometryTuning,
    pub projectiles: ProjectileTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            tank: EnemyProfile::TANK,
            apc: EnemyProfile::APC,
            boss: BossTuning::default(),
            pickups: PickupTuning::default(),
            geometry: GeometryTuning::default(),
            projectiles: ProjectileTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields take authored defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        if p.start_health <= 0 || p.start_health > p.max_health {
            return Err(invalid(format!(
                "player start health {} outside 1..={}",
                p.start_health, p.max_health
            )));
        }
        if p.start_main_ammo < 0 || p.start_main_ammo > p.max_main_ammo {
            return Err(invalid(format!(
                "player start main ammo {} outside 0..={}",
                p.start_main_ammo, p.max_main_ammo
            )));
        }
        if p.start_mg_ammo < 0 || p.start_mg_ammo > p.max_mg_ammo {
            return Err(invalid(format!(
                "player start mg ammo {} outside 0..={}",
                p.start_mg_ammo, p.max_mg_ammo
            )));
        }
        if p.main_gun_delay <= 0.0 || p.mg_delay <= 0.0 {
            return Err(invalid("player fire delays must be positive".into()));
        }

        for (name, profile) in [("tank", &self.tank), ("apc", &self.apc)] {
            if profile.health <= 0 {
                return Err(invalid(format!("{name} health must be positive")));
            }
            if profile.fire_rate <= 0.0 {
                return Err(invalid(format!("{name} fire rate must be positive")));
            }
        }

        if self.boss.max_health <= 0 || self.boss.fire_interval <= 0.0 {
            return Err(invalid(
                "boss health and fire interval must be positive".into(),
            ));
        }

        let pools = &self.projectiles;
        for (name, spec) in [
            ("player_main", &pools.player_main),
            ("player_mg", &pools.player_mg),
            ("enemy_tank", &pools.enemy_tank),
            ("enemy_apc", &pools.enemy_apc),
            ("boss_main", &pools.boss_main),
            ("boss_special", &pools.boss_special),
        ] {
            if spec.capacity == 0 {
                return Err(invalid(format!("{name} pool capacity must be positive")));
            }
            if spec.max_range <= 0.0 {
                return Err(invalid(format!("{name} max range must be positive")));
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> TuningError {
    TuningError::Invalid(msg)
}
