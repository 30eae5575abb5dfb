//! Audio cue dispatch
//!
//! The engine only names sounds. `AudioManager` applies the player's sound
//! settings and forwards cues to an [`AudioSink`] that owns the actual
//! synthesis.

use crate::sim::AudioCue;

/// Something that can voice a cue
pub trait AudioSink {
    /// Play a cue at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Sink that just records what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<(AudioCue, f32)>,
}

impl CueLog {
    pub fn cues(&self) -> Vec<AudioCue> {
        self.played.iter().map(|(cue, _)| *cue).collect()
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::trace!("cue {:?} at {:.2}", cue, volume);
        self.played.push((cue, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<K: AudioSink> {
    sink: K,
    enabled: bool,
    master_volume: f32,
    muted: bool,
    /// Whether the sink currently has the siren running
    siren_playing: bool,
}

impl<K: AudioSink> AudioManager<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            enabled: true,
            master_volume: 0.8,
            muted: false,
            siren_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Turn sound on or off; turning it off silences a running siren
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop_siren();
        }
        log::info!("Sound {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn siren_playing(&self) -> bool {
        self.siren_playing
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if !self.enabled || self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    fn stop_siren(&mut self) {
        if self.siren_playing {
            self.siren_playing = false;
            self.sink.play(AudioCue::SirenStop, 0.0);
        }
    }

    /// Forward one tick's cues in order
    pub fn dispatch(&mut self, cues: &[AudioCue]) {
        for cue in cues {
            self.play(*cue);
        }
    }

    /// Play a single cue, honoring the sound settings
    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        match cue {
            // Teardown always reaches the sink
            AudioCue::SirenStop => self.stop_siren(),
            AudioCue::SirenStart => {
                if vol > 0.0 && !self.siren_playing {
                    self.siren_playing = true;
                    self.sink.play(cue, vol);
                }
            }
            AudioCue::SirenPulse => {
                if vol > 0.0 && self.siren_playing {
                    self.sink.play(cue, vol);
                }
            }
            _ => {
                if vol > 0.0 {
                    self.sink.play(cue, vol);
                }
            }
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}
