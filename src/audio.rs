//! Sound cue playback
//!
//! The simulation reports what happened as `GameEvent`s; this module decides
//! which of the six logical cues each one plays and at what volume. Actual
//! playback belongs to the platform through `CueSink`.

use crate::settings::Settings;
use crate::sim::{EnemyKind, GameEvent, PoolKind};

/// Logical sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player main gun fired
    MainGunFire,
    /// Machine gun fire, player or APC
    SecondaryFire,
    /// Enemy tank fired
    EnemyFire,
    /// Projectile struck an enemy or the boss
    Hit,
    /// Enemy or boss destroyed
    Death,
    /// Pickup collected
    Pickup,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::MainGunFire,
        SoundCue::SecondaryFire,
        SoundCue::EnemyFire,
        SoundCue::Hit,
        SoundCue::Death,
        SoundCue::Pickup,
    ];

    /// Name the platform uses to look up the loaded clip
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::MainGunFire => "main_gun_fire",
            SoundCue::SecondaryFire => "secondary_fire",
            SoundCue::EnemyFire => "enemy_fire",
            SoundCue::Hit => "hit",
            SoundCue::Death => "death",
            SoundCue::Pickup => "pickup",
        }
    }

    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::PlayerFired {
                weapon: PoolKind::PlayerMain,
            } => Some(SoundCue::MainGunFire),
            GameEvent::PlayerFired { .. } => Some(SoundCue::SecondaryFire),
            GameEvent::EnemyFired {
                kind: EnemyKind::Tank,
                ..
            } => Some(SoundCue::EnemyFire),
            GameEvent::EnemyFired {
                kind: EnemyKind::Apc,
                ..
            } => Some(SoundCue::SecondaryFire),
            GameEvent::EnemyHit { .. } | GameEvent::BossHit { .. } => Some(SoundCue::Hit),
            GameEvent::EnemyDestroyed { .. } | GameEvent::BossDestroyed => Some(SoundCue::Death),
            GameEvent::PickupCollected { .. } => Some(SoundCue::Pickup),
            GameEvent::BossSalvo { .. }
            | GameEvent::PlayerHit { .. }
            | GameEvent::PlayerDied
            | GameEvent::Victory
            | GameEvent::SessionReset => None,
        }
    }
}

/// Fire-and-forget cue playback provided by the platform
pub trait CueSink {
    fn play_cue(&mut self, cue: SoundCue, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone, PartialEq)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::default();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue unless muted
    pub fn play(&self, sink: &mut impl CueSink, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play_cue(cue, vol);
    }

    /// Play the cue of every event that has one. Returns how many played.
    pub fn play_events(&self, sink: &mut impl CueSink, events: &[GameEvent]) -> usize {
        if self.effective_volume() <= 0.0 {
            return 0;
        }
        let mut played = 0;
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(sink, cue);
            played += 1;
        }
        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundCue, f32)>);

    impl CueSink for Recorder {
        fn play_cue(&mut self, cue: SoundCue, volume: f32) {
            self.0.push((cue, volume));
        }
    }

    #[test]
    fn test_cue_names_unique() {
        let mut names: Vec<_> = SoundCue::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_event_mapping() {
        let fired = |weapon| GameEvent::PlayerFired { weapon };
        assert_eq!(
            SoundCue::for_event(&fired(PoolKind::PlayerMain)),
            Some(SoundCue::MainGunFire)
        );
        assert_eq!(
            SoundCue::for_event(&fired(PoolKind::PlayerMg)),
            Some(SoundCue::SecondaryFire)
        );
        assert_eq!(
            SoundCue::for_event(&GameEvent::EnemyFired {
                index: 3,
                kind: EnemyKind::Tank
            }),
            Some(SoundCue::EnemyFire)
        );
        assert_eq!(
            SoundCue::for_event(&GameEvent::EnemyFired {
                index: 22,
                kind: EnemyKind::Apc
            }),
            Some(SoundCue::SecondaryFire)
        );
        assert_eq!(
            SoundCue::for_event(&GameEvent::BossSalvo {
                main: 10,
                special: 8
            }),
            None
        );
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::default();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        let mut sink = Recorder::default();
        audio.play(&mut sink, SoundCue::Hit);
        assert_eq!(sink.0, vec![(SoundCue::Hit, 0.5)]);

        audio.set_muted(true);
        let events = [GameEvent::BossDestroyed, GameEvent::PlayerDied];
        assert_eq!(audio.play_events(&mut sink, &events), 0);
        assert_eq!(sink.0.len(), 1);
    }

    #[test]
    fn test_play_events_in_order() {
        let audio = AudioManager::from_settings(&Settings::default());
        let mut sink = Recorder::default();
        let events = [
            GameEvent::EnemyHit {
                index: 0,
                kind: EnemyKind::Tank,
            },
            GameEvent::PlayerHit {
                source: PoolKind::EnemyApc,
                damage: 1,
            },
            GameEvent::EnemyDestroyed {
                index: 0,
                kind: EnemyKind::Tank,
            },
        ];
        assert_eq!(audio.play_events(&mut sink, &events), 2);
        let cues: Vec<_> = sink.0.iter().map(|(c, _)| *c).collect();
        assert_eq!(cues, vec![SoundCue::Hit, SoundCue::Death]);
    }
}
