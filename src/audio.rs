//! Audio routing
//!
//! The game only decides *what* to play; an `AudioOutput` backend does the
//! mixing. Sounds whose clip failed to load are disabled with one warning,
//! and with no backend at all the game runs silent.

use std::collections::HashMap;

use crate::assets::Assets;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Collectible picked up
    Collect,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Collect, SoundEffect::GameOver];

    /// Logical asset name of the clip
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Collect => "collect",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Asset name of the looping background track
pub const MUSIC_ASSET: &str = "music";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    /// Start the track from the top, looping
    Play,
    Pause,
    Resume,
    Stop,
}

/// Playback backend (fire-and-forget)
pub trait AudioOutput {
    fn play_clip(&mut self, name: &str, clip: &[u8], volume: f32);
    fn music(&mut self, command: MusicCommand, track: &[u8], volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioOutput>>,
    clips: HashMap<SoundEffect, Vec<u8>>,
    music: Option<Vec<u8>>,
    sfx_gain: f32,
    music_gain: f32,
    muted: bool,
}

impl AudioManager {
    /// Pick up every clip present in `assets`
    pub fn new(
        backend: Option<Box<dyn AudioOutput>>,
        assets: &Assets,
        settings: &Settings,
    ) -> Self {
        if backend.is_none() {
            log::warn!("No audio output - audio disabled");
        }

        let mut clips = HashMap::new();
        for effect in SoundEffect::ALL {
            match assets.get(effect.asset_name()) {
                Some(bytes) => {
                    clips.insert(effect, bytes.to_vec());
                }
                None => log::debug!("Sound {:?} not loaded", effect),
            }
        }
        let music = assets.get(MUSIC_ASSET).map(<[u8]>::to_vec);
        if music.is_none() {
            log::debug!("Background music not loaded");
        }

        Self {
            backend,
            clips,
            music,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            muted: settings.muted,
        }
    }

    /// Manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            backend: None,
            clips: HashMap::new(),
            music: None,
            sfx_gain: 0.0,
            music_gain: 0.0,
            muted: true,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_available(&self, effect: SoundEffect) -> bool {
        self.backend.is_some() && self.clips.contains_key(&effect)
    }

    fn gain(&self, channel: f32) -> f32 {
        if self.muted { 0.0 } else { channel }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.gain(self.sfx_gain);
        if vol <= 0.0 {
            return;
        }
        let (Some(backend), Some(clip)) = (self.backend.as_mut(), self.clips.get(&effect)) else {
            return;
        };
        backend.play_clip(effect.asset_name(), clip, vol);
    }

    /// Drive the background track
    pub fn music(&mut self, command: MusicCommand) {
        let vol = self.gain(self.music_gain);
        let (Some(backend), Some(track)) = (self.backend.as_mut(), self.music.as_ref()) else {
            return;
        };
        backend.music(command, track, vol);
    }
}
