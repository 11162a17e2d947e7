//! Fire-rate gate shared by every weapon

use serde::{Deserialize, Serialize};

/// A can-fire flag plus the time accumulated since it was cleared
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Seconds that must accumulate before firing again
    pub interval: f32,
    pub elapsed: f32,
    pub ready: bool,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        assert!(interval > 0.0, "cooldown interval must be positive");
        Self {
            interval,
            elapsed: 0.0,
            ready: true,
        }
    }

    /// Mark a shot as taken
    pub fn trigger(&mut self) {
        self.ready = false;
        self.elapsed = 0.0;
    }

    /// Accumulate time while not ready; re-arm once the interval has passed
    pub fn tick(&mut self, dt: f32) {
        if self.ready {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            self.ready = true;
        }
    }
}
