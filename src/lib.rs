//! The Last Tank - top-down tank combat simulation core
//!
//! Core modules:
//! - `sim`: Frame simulation (projectiles, enemies, boss, pickups, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, HUD)
//! - `audio`: Cue playback front for the external audio device
//! - `platform`: Window/input/audio/draw collaborator interface and frame driver
//! - `view`: Draw submission policy and HUD model

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Target frame rate; per-frame authored quantities are scaled by `dt * SIM_RATE`
    pub const SIM_RATE: f32 = 60.0;
    /// Nominal frame time at the target rate
    pub const SIM_DT: f32 = 1.0 / SIM_RATE;
    /// Largest frame delta the simulation accepts (hitches are clamped)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Collision radii
    pub const PROJECTILE_RADIUS: f32 = 1.0;
    pub const ENEMY_RADIUS: f32 = 3.0;
    /// Player hull radius against incoming fire
    pub const PLAYER_HIT_RADIUS: f32 = 2.0;
    /// Player radius for pickup collection
    pub const PLAYER_PICKUP_RADIUS: f32 = 3.0;
    pub const PICKUP_RADIUS: f32 = 1.0;
    /// Sphere used for the speculative movement probe
    pub const MOVE_PROBE_RADIUS: f32 = 1.0;

    /// Enemy turret alignment: degrees per frame and firing tolerance band
    pub const ENEMY_TURN_STEP_DEG: f32 = 1.0;
    pub const ENEMY_AIM_TOLERANCE_DEG: f32 = 1.0;
    /// Offset added to the bearing so the authored model forward axis faces the target
    pub const ENEMY_MODEL_YAW_OFFSET_DEG: f32 = 90.0;

    /// Draw culling radius around the player
    pub const VISIBILITY_RADIUS: f32 = 50.0;
    /// Boss health bar appears within this distance of the boss
    pub const BOSS_BAR_RADIUS: f32 = 100.0;

    /// Player spawn point and facing
    pub const PLAYER_SPAWN: Vec3 = Vec3::ZERO;
    pub const PLAYER_SPAWN_YAW: f32 = 180.0;
}

/// Wrap an angle in degrees to [-180, 180)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Ground-plane heading for a yaw in degrees (yaw 0 faces +Z)
#[inline]
pub fn yaw_to_direction(yaw_deg: f32) -> Vec3 {
    let rad = yaw_deg.to_radians();
    Vec3::new(rad.sin(), 0.0, rad.cos())
}

/// Yaw in degrees that points an enemy model from `from` toward `to`
#[inline]
pub fn bearing_yaw(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    -d.z.atan2(d.x).to_degrees() + consts::ENEMY_MODEL_YAW_OFFSET_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(190.0) - (-170.0)).abs() < 1e-4);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert!((wrap_degrees(45.0) - 45.0).abs() < 1e-4);
        assert!((wrap_degrees(180.0) - (-180.0)).abs() < 1e-4);
        assert!((wrap_degrees(720.0 + 30.0) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_degrees_huge_input_terminates() {
        for angle in [1e12_f32, -3.5e15, f32::MAX] {
            let wrapped = wrap_degrees(angle);
            assert!((-180.0..=180.0).contains(&wrapped), "{angle} -> {wrapped}");
        }
    }

    #[test]
    fn test_bearing_yaw_faces_target() {
        let from = Vec3::new(3.0, 0.0, -7.0);
        for to in [
            Vec3::new(10.0, 0.0, -7.0),
            Vec3::new(3.0, 0.0, 5.0),
            Vec3::new(-4.0, 0.0, -20.0),
        ] {
            let dir = yaw_to_direction(bearing_yaw(from, to));
            let want = (to - from).normalize();
            assert!((dir - want).length() < 1e-4, "{dir:?} vs {want:?}");
        }
    }
}
