//! Simulation state and session flags
//!
//! `GameState` owns every entity collection for the lifetime of a run.
//! Collaborators only ever see it by reference between frames.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::boss::Boss;
use super::enemy::{Enemy, EnemyKind, spawn_enemies};
use super::pickup::{Pickup, PickupKind, spawn_pickups};
use super::player::Player;
use super::pool::{PoolKind, Projectiles};
use crate::tuning::Tuning;

/// Coarse session phase, derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player health reached zero; the world keeps running
    PlayerDead,
    /// Every enemy and the boss destroyed
    Victory,
}

/// Session flags. Death and victory are tracked independently; both can be
/// set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub player_dead: bool,
    pub victory: bool,
}

/// Something that happened during a frame, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerFired { weapon: PoolKind },
    EnemyFired { index: usize, kind: EnemyKind },
    BossSalvo { main: usize, special: usize },
    EnemyHit { index: usize, kind: EnemyKind },
    EnemyDestroyed { index: usize, kind: EnemyKind },
    BossHit { damage: i32 },
    BossDestroyed,
    PlayerHit { source: PoolKind, damage: i32 },
    PickupCollected { kind: PickupKind },
    PlayerDied,
    Victory,
    SessionReset,
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Frames simulated since construction or the last reset
    pub frame: u64,
    pub arena: Arena,
    pub player: Player,
    /// Tanks first, then APCs
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub pickups: Vec<Pickup>,
    pub projectiles: Projectiles,
    pub session: Session,
    /// Drained by the frame driver after every tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh run. Panics if `tuning` fails validation.
    pub fn new(tuning: Tuning) -> Self {
        if let Err(err) = tuning.validate() {
            panic!("{err}");
        }

        Self {
            frame: 0,
            arena: Arena::new(&tuning),
            player: Player::new(&tuning.player),
            enemies: spawn_enemies(&tuning),
            boss: Boss::new(&tuning.boss),
            pickups: spawn_pickups(),
            projectiles: Projectiles::new(&tuning.projectiles),
            session: Session::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Return every mutable field to its initial value. Pending events are
    /// kept and `SessionReset` is appended.
    pub fn reset(&mut self) {
        let tuning = &self.tuning;
        self.frame = 0;
        self.player = Player::new(&tuning.player);
        self.enemies = spawn_enemies(tuning);
        self.boss = Boss::new(&tuning.boss);
        self.pickups = spawn_pickups();
        self.projectiles = Projectiles::new(&tuning.projectiles);
        self.session = Session::default();
        self.events.push(GameEvent::SessionReset);
        log::info!("Session reset");
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        if self.session.player_dead {
            GamePhase::PlayerDead
        } else if self.session.victory {
            GamePhase::Victory
        } else {
            GamePhase::Playing
        }
    }

    pub fn enemies_remaining(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Update death and victory flags from the current world
    pub fn evaluate_session(&mut self) {
        if self.player.health <= 0 {
            self.player.health = 0;
            if !self.session.player_dead {
                self.session.player_dead = true;
                self.events.push(GameEvent::PlayerDied);
                log::info!("Player destroyed at frame {}", self.frame);
            }
        }

        if !self.session.victory && self.enemies_remaining() == 0 && self.boss.is_destroyed() {
            self.session.victory = true;
            self.events.push(GameEvent::Victory);
            log::info!("Victory at frame {}", self.frame);
        }
    }
}
