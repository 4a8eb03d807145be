use log::debug;

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    ActivateCheckpoint,
    RaceStart,
    TimerBleep,
}

impl Sound {
    pub fn path(&self) -> &'static str {
        match self {
            Sound::ActivateCheckpoint => "assets/sounds/activate_checkpoint.wav",
            Sound::RaceStart => "assets/sounds/race_start.wav",
            Sound::TimerBleep => "assets/sounds/timer_bleep.wav",
        }
    }
}

// Implemented by the audio backend. Volume is already scaled, 0.0-1.0.
pub trait SoundPlayer {
    fn play(&mut self, sound: Sound, volume: f32);
}

pub struct NoopSoundPlayer {}

impl SoundPlayer for NoopSoundPlayer {
    fn play(&mut self, _sound: Sound, _volume: f32) {}
}

pub struct SoundManager {
    internal: Box<dyn SoundPlayer>,
    volume_scale: f32,
}

impl SoundManager {
    pub fn with_player(internal: Box<dyn SoundPlayer>, settings: &Settings) -> SoundManager {
        Self {
            internal,
            volume_scale: settings.volume_scale(),
        }
    }

    pub fn noop_manager() -> SoundManager {
        Self::with_player(Box::new(NoopSoundPlayer {}), &Settings::default())
    }

    pub fn set_settings(&mut self, settings: &Settings) {
        self.volume_scale = settings.volume_scale();
    }

    pub fn play(&mut self, sound: Sound, volume: f32) {
        let volume = volume * self.volume_scale;
        debug!("playing {:?} at {:.2}", sound, volume);
        self.internal.play(sound, volume)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSoundPlayer;
    use super::*;

    #[test]
    fn volume_is_scaled_by_settings() {
        let player = RecordingSoundPlayer::default();
        let settings = Settings {
            volume: 50,
            fullscreen: false,
        };
        let mut sounds = SoundManager::with_player(Box::new(player.clone()), &settings);
        sounds.play(Sound::RaceStart, 0.5);
        assert_eq!(*player.played.borrow(), vec![(Sound::RaceStart, 0.25)]);

        sounds.set_settings(&Settings::default());
        sounds.play(Sound::TimerBleep, 0.1);
        assert_eq!(player.sounds(), vec![Sound::RaceStart, Sound::TimerBleep]);
    }
}
