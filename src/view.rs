//! Draw submission policy and HUD model
//!
//! Turns a `GameState` into what the platform should draw this frame. The
//! platform owns models, textures and fonts; it only receives categories,
//! positions and strings.

use glam::Vec3;

use crate::consts::{BOSS_BAR_RADIUS, VISIBILITY_RADIUS};
use crate::settings::Settings;
use crate::sim::{EnemyKind, GameState, PickupKind, PoolKind};

/// Model category for one draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawCategory {
    Player,
    Projectile(PoolKind),
    Enemy(EnemyKind),
    Boss,
    Pickup(PickupKind),
    VerticalWall,
    HorizontalWall,
    Building,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub category: DrawCategory,
    pub position: Vec3,
    /// Model rotation about Y, degrees
    pub yaw: f32,
}

/// Fixed HUD messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Objective,
    BossName,
    GameOver,
    Victory,
    RestartHint,
    QuitHint,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::Objective => "Destroy All Enemies",
            Banner::BossName => "STRANDED LAND BATTLESHIP",
            Banner::GameOver => "Game Over!",
            Banner::Victory => "You won!",
            Banner::RestartHint => "Press R to restart game",
            Banner::QuitHint => "Press ESC to quit game",
        }
    }
}

pub const CONTROLS_LEGEND: [&str; 5] = [
    "Controls:",
    "Arrow Up/Arrow Down - Move Forward/Backward",
    "Arrow Right/Arrow Left - Turn Right/Left",
    "Spacebar - Fire Tank Gun",
    "Left Alt - Fire Machine Gun",
];

#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub health: i32,
    pub main_ammo: i32,
    pub mg_ammo: i32,
    /// Boss health in [0, 1], present while the boss bar is shown
    pub boss_bar: Option<f32>,
    pub banners: Vec<Banner>,
    pub show_controls: bool,
    pub show_fps: bool,
}

/// Everything the platform needs to present one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub camera_target: Vec3,
    pub items: Vec<DrawItem>,
    pub hud: HudView,
}

impl HudView {
    /// Legend lines to draw this frame
    pub fn controls_legend(&self) -> &'static [&'static str] {
        if self.show_controls {
            &CONTROLS_LEGEND
        } else {
            &[]
        }
    }
}

impl FrameView {
    pub fn count(&self, category: DrawCategory) -> usize {
        self.items.iter().filter(|i| i.category == category).count()
    }
}

fn visible(player: Vec3, position: Vec3) -> bool {
    player.distance(position) <= VISIBILITY_RADIUS
}

/// Build this frame's draw list and HUD
pub fn build_frame(state: &GameState, settings: &Settings) -> FrameView {
    let player = &state.player;
    let eye = player.position;
    let mut items = Vec::new();

    items.push(DrawItem {
        category: DrawCategory::Player,
        position: eye,
        yaw: player.yaw,
    });

    // Projectiles and the boss are always drawn
    for kind in PoolKind::ALL {
        for (_, p) in state.projectiles.pool(kind).iter_active() {
            items.push(DrawItem {
                category: DrawCategory::Projectile(kind),
                position: p.position,
                yaw: p.yaw,
            });
        }
    }
    items.push(DrawItem {
        category: DrawCategory::Boss,
        position: state.boss.position,
        yaw: 0.0,
    });

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        if visible(eye, enemy.position) {
            items.push(DrawItem {
                category: DrawCategory::Enemy(enemy.kind),
                position: enemy.position,
                yaw: enemy.yaw,
            });
        }
    }

    for pickup in state.pickups.iter().filter(|p| !p.consumed) {
        if visible(eye, pickup.position) {
            items.push(DrawItem {
                category: DrawCategory::Pickup(pickup.kind),
                position: pickup.position,
                yaw: pickup.spin,
            });
        }
    }

    let arena = &state.arena;
    for (category, set) in [
        (DrawCategory::VerticalWall, &arena.vertical_walls),
        (DrawCategory::HorizontalWall, &arena.horizontal_walls),
        (DrawCategory::Building, &arena.buildings),
    ] {
        for b in set.boxes() {
            let c = b.center();
            let ground = Vec3::new(c.x, 0.0, c.z);
            if visible(eye, ground) {
                items.push(DrawItem {
                    category,
                    position: ground,
                    yaw: 0.0,
                });
            }
        }
    }

    FrameView {
        camera_target: eye,
        items,
        hud: build_hud(state, settings),
    }
}

fn build_hud(state: &GameState, settings: &Settings) -> HudView {
    let session = state.session;
    let playing = !session.player_dead && !session.victory;
    let mut banners = Vec::new();
    let mut boss_bar = None;

    if session.player_dead {
        banners.extend([Banner::GameOver, Banner::RestartHint, Banner::QuitHint]);
    }
    if playing {
        banners.push(Banner::Objective);
        if state.player.position.distance(state.boss.position) <= BOSS_BAR_RADIUS {
            banners.push(Banner::BossName);
            boss_bar = Some(state.boss.health_fraction());
        }
    }
    if session.victory {
        banners.extend([Banner::Victory, Banner::RestartHint, Banner::QuitHint]);
    }

    HudView {
        health: state.player.health,
        main_ammo: state.player.main_ammo,
        mg_ammo: state.player.mg_ammo,
        boss_bar,
        banners,
        show_controls: playing && settings.show_controls,
        show_fps: settings.show_fps,
    }
}
