//! Platform abstraction layer
//!
//! The window, input devices, audio device and renderer live outside this
//! crate. They are reached through `Platform`:
//! - Frame time and quit requests
//! - Key state (held) and key presses (edge)
//! - Cue playback (via `CueSink`)
//! - Frame submission

use crate::audio::{AudioManager, CueSink};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};
use crate::view::{FrameView, build_frame};

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    TurnLeft,
    TurnRight,
    Forward,
    Backward,
    FireMain,
    FireSecondary,
    Restart,
    Quit,
}

/// External window/input/audio/render collaborator
pub trait Platform: CueSink {
    /// Seconds since the previous frame
    fn frame_time(&self) -> f32;
    fn should_close(&self) -> bool;
    /// Key held this frame
    fn key_down(&self, key: Key) -> bool;
    /// Key went down this frame
    fn key_pressed(&self, key: Key) -> bool;
    fn submit(&mut self, frame: &FrameView);
}

impl TickInput {
    /// Sample input: movement and machine gun are held, main gun and
    /// restart fire on the press edge
    pub fn from_platform(platform: &impl Platform) -> Self {
        Self {
            turn_left: platform.key_down(Key::TurnLeft),
            turn_right: platform.key_down(Key::TurnRight),
            forward: platform.key_down(Key::Forward),
            backward: platform.key_down(Key::Backward),
            fire_main: platform.key_pressed(Key::FireMain),
            fire_mg: platform.key_down(Key::FireSecondary),
            restart: platform.key_pressed(Key::Restart),
        }
    }
}

/// Run one complete frame: input, simulation, cues, draw. Returns false once
/// the platform asks to close.
pub fn run_frame(
    state: &mut GameState,
    platform: &mut impl Platform,
    audio: &AudioManager,
    settings: &Settings,
) -> bool {
    if platform.should_close() || platform.key_pressed(Key::Quit) {
        return false;
    }

    let input = TickInput::from_platform(&*platform);
    tick(state, &input, platform.frame_time());

    let events = state.take_events();
    audio.play_events(&mut *platform, &events);

    let frame = build_frame(state, settings);
    platform.submit(&frame);
    true
}
