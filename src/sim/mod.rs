//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! concerns:
//! - Everything advances from the frame delta passed to `tick`
//! - Fixed iteration order (slot and table index)
//! - No rendering, audio or input dependencies

pub mod arena;
pub mod boss;
pub mod bounds;
pub mod combat;
pub mod cooldown;
pub mod enemy;
pub mod pickup;
pub mod player;
pub mod pool;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use boss::{Boss, Salvo};
pub use bounds::{Aabb, spheres_overlap};
pub use combat::{movement_vetoed, resolve};
pub use cooldown::Cooldown;
pub use enemy::{AiStep, Enemy, EnemyKind};
pub use pickup::{Pickup, PickupKind};
pub use player::Player;
pub use pool::{PoolKind, Projectile, ProjectilePool, Projectiles};
pub use state::{GameEvent, GamePhase, GameState, Session};
pub use tick::{TickInput, tick};
