//! Audio seam
//!
//! The simulation fires cues and never waits on them. Playback itself
//! (mixer, sample loading) belongs to whatever implements `AudioSink`.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ship fired a projectile
    ShipFired,
    /// An alien fired a projectile
    AlienFired,
    /// Alien destroyed by a ship projectile
    AlienDestroyed,
    /// Ship hit, one ship lost
    LifeLost,
    /// New game started
    GameStarted,
    /// Last ship lost
    GameOver,
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Start looping from the beginning at full volume
    Play,
    Pause,
    Resume,
    /// Restart the current track (new level)
    Rewind,
    /// Silence immediately
    Stop,
}

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Play a sound effect
    fn play(&mut self, effect: SoundEffect);

    /// Control background music
    fn music(&mut self, cue: MusicCue);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}

    fn music(&mut self, _cue: MusicCue) {}
}

/// Logs cues at debug level (headless runs)
#[derive(Debug)]
pub struct LogAudio {
    master_volume: f32,
    muted: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
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

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sfx {effect:?} (vol {vol:.2})");
    }

    fn music(&mut self, cue: MusicCue) {
        if self.muted {
            return;
        }
        log::debug!("music {cue:?}");
    }
}

/// Records every cue in order; used by tests to check trigger points
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub effects: Vec<SoundEffect>,
    pub music: Vec<MusicCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }

    fn music(&mut self, cue: MusicCue) {
        self.music.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        let mut audio = LogAudio::new();
        audio.set_master_volume(3.0);
        assert_eq!(audio.effective_volume(), 1.0);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
