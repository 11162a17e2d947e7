//! The Last Tank headless harness
//!
//! Drives the simulation through the same frame driver a windowed build would
//! use, with a seeded autopilot standing in for the keyboard. Useful for soak
//! runs and balance checks.
//!
//! Usage: last-tank [--frames N] [--seed S] [--tuning path.json] [--settings path.json]
//!
//! Settings default to `last_tank_settings.json` in the working directory.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use last_tank::audio::{AudioManager, CueSink, SoundCue};
use last_tank::consts::SIM_DT;
use last_tank::platform::{Key, Platform, run_frame};
use last_tank::sim::{GamePhase, GameState};
use last_tank::view::FrameView;
use last_tank::{Settings, Tuning, wrap_degrees};

/// Frames to wait on a terminal banner before pressing restart
const RESTART_DELAY_FRAMES: u32 = 180;

struct Args {
    frames: u64,
    seed: u64,
    tuning: Option<String>,
    settings: Option<String>,
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .skip_while(|a| a.as_str() != flag)
        .nth(1)
        .map(String::as_str)
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let frames = match arg_value(&args, "--frames") {
        Some(v) => v.parse().map_err(|_| format!("bad --frames value: {v}"))?,
        None => 60 * 60,
    };
    let seed = match arg_value(&args, "--seed") {
        Some(v) => v.parse().map_err(|_| format!("bad --seed value: {v}"))?,
        None => 1,
    };
    Ok(Args {
        frames,
        seed,
        tuning: arg_value(&args, "--tuning").map(str::to_owned),
        settings: arg_value(&args, "--settings").map(str::to_owned),
    })
}

/// Seeded stand-in for a human at the keyboard
struct Autopilot {
    rng: Pcg32,
    held: Vec<Key>,
    pressed: Vec<Key>,
    terminal_frames: u32,
    cues: HashMap<SoundCue, u32>,
    last_frame: Option<FrameView>,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: Vec::new(),
            pressed: Vec::new(),
            terminal_frames: 0,
            cues: HashMap::new(),
            last_frame: None,
        }
    }

    /// Decide next frame's keys from the current state
    fn plan(&mut self, state: &GameState) {
        self.held.clear();
        self.pressed.clear();

        if state.phase() != GamePhase::Playing {
            self.terminal_frames += 1;
            if self.terminal_frames >= RESTART_DELAY_FRAMES {
                self.terminal_frames = 0;
                self.pressed.push(Key::Restart);
            }
            return;
        }
        self.terminal_frames = 0;

        let player = &state.player;
        let target = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.position)
            .min_by(|a, b| {
                a.distance(player.position)
                    .total_cmp(&b.distance(player.position))
            })
            .unwrap_or(state.boss.position);

        let d = target - player.position;
        let desired = d.x.atan2(d.z).to_degrees();
        let error = wrap_degrees(desired - player.yaw);
        if error > 2.0 {
            self.held.push(Key::TurnLeft);
        } else if error < -2.0 {
            self.held.push(Key::TurnRight);
        } else {
            if self.rng.random_bool(0.2) {
                self.pressed.push(Key::FireMain);
            }
            if self.rng.random_bool(0.5) {
                self.held.push(Key::FireSecondary);
            }
        }

        // Wander so the hull doesn't stay pinned against a wall
        match self.rng.random_range(0..10) {
            0 => self.held.push(Key::Backward),
            1 => {}
            _ => self.held.push(Key::Forward),
        }
    }
}

impl CueSink for Autopilot {
    fn play_cue(&mut self, cue: SoundCue, _volume: f32) {
        *self.cues.entry(cue).or_insert(0) += 1;
    }
}

impl Platform for Autopilot {
    fn frame_time(&self) -> f32 {
        SIM_DT
    }

    fn should_close(&self) -> bool {
        false
    }

    fn key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn submit(&mut self, frame: &FrameView) {
        self.last_frame = Some(frame.clone());
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            log::error!("{err}");
            eprintln!("usage: last-tank [--frames N] [--seed S] [--tuning path] [--settings path]");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let settings = Settings::load(args.settings.as_deref().unwrap_or(Settings::FILE_NAME));
    let audio = AudioManager::from_settings(&settings);

    log::info!(
        "The Last Tank (headless) starting: {} frames, seed {}",
        args.frames,
        args.seed
    );

    let mut state = GameState::new(tuning);
    let mut pilot = Autopilot::new(args.seed);
    let mut resets = 0u32;
    for _ in 0..args.frames {
        pilot.plan(&state);
        if pilot.pressed.contains(&Key::Restart) {
            resets += 1;
        }
        if !run_frame(&mut state, &mut pilot, &audio, &settings) {
            break;
        }
    }

    log::info!(
        "Finished: phase {:?}, {} enemies left, boss {}/{}, player health {}, {} resets",
        state.phase(),
        state.enemies_remaining(),
        state.boss.health.max(0),
        state.boss.max_health,
        state.player.health,
        resets
    );
    for cue in SoundCue::ALL {
        log::info!(
            "  {:>15}: {}",
            cue.name(),
            pilot.cues.get(&cue).copied().unwrap_or(0)
        );
    }
    if let Some(frame) = &pilot.last_frame {
        log::debug!("Last frame drew {} items", frame.items.len());
    }

    ExitCode::SUCCESS
}
