use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use crate::constants::{DEFAULT_VOLUME, SETTINGS_PATH};
use crate::filemanager::FileManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub volume: u8, // 0-100
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            volume: DEFAULT_VOLUME,
            fullscreen: false,
        }
    }
}

impl Settings {
    // Unknown keys and bad values are skipped; the defaults fill in.
    pub fn parse(text: &str) -> Settings {
        let mut settings = Settings::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(';') else {
                warn!("skipping settings line {:?}", line);
                continue;
            };
            match key {
                "volume" => match value.trim().parse::<i64>() {
                    Ok(volume) => settings.volume = volume.clamp(0, 100) as u8,
                    Err(e) => warn!("invalid volume {:?}: {}", value, e),
                },
                "fullscreen" => match value.trim() {
                    "0" => settings.fullscreen = false,
                    "1" => settings.fullscreen = true,
                    _ => warn!("invalid fullscreen flag {:?}", value),
                },
                _ => warn!("unknown setting {:?}", key),
            }
        }
        settings
    }

    pub fn to_file_string(&self) -> String {
        format!(
            "volume;{}\nfullscreen;{}\n",
            self.volume,
            u8::from(self.fullscreen)
        )
    }

    pub fn load(files: &FileManager) -> Result<Settings> {
        Ok(files
            .read_optional(Path::new(SETTINGS_PATH))?
            .map(|text| Settings::parse(&text))
            .unwrap_or_default())
    }

    pub fn save(&self, files: &FileManager) -> Result<()> {
        info!("saving settings: {:?}", self);
        files.write(Path::new(SETTINGS_PATH), &self.to_file_string())
    }

    // Multiplier applied to every sound.
    pub fn volume_scale(&self) -> f32 {
        self.volume as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        let files = FileManager::in_memory();
        let settings = Settings::load(&files).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.volume, 100);
        assert!(!settings.fullscreen);
    }

    #[test]
    fn round_trip() {
        let files = FileManager::in_memory();
        let settings = Settings {
            volume: 35,
            fullscreen: true,
        };
        settings.save(&files).unwrap();
        assert_eq!(
            files.read_to_string(Path::new(SETTINGS_PATH)).unwrap(),
            "volume;35\nfullscreen;1\n"
        );
        assert_eq!(Settings::load(&files).unwrap(), settings);
    }

    #[test]
    fn partial_and_bad_lines() {
        let settings = Settings::parse("fullscreen;1\nvolume;loud\ncolor;red\nnonsense\n");
        assert_eq!(settings.volume, 100);
        assert!(settings.fullscreen);

        let settings = Settings::parse("volume;250\n");
        assert_eq!(settings.volume, 100);
        let settings = Settings::parse("volume;50\n");
        assert_eq!(settings.volume_scale(), 0.5);
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(Settings::parse("volume;300\n").volume, 100);
        assert_eq!(Settings::parse("volume;100000\n").volume, 100);
        assert_eq!(Settings::parse("volume;-5\n").volume, 0);
        assert_eq!(Settings::parse("volume;0\n").volume, 0);
    }
}
