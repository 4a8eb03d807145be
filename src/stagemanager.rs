use anyhow::Result;
use log::{error, info};

use crate::filemanager::FileManager;
use crate::inputmanager::InputSnapshot;
use crate::level::Level;
use crate::levelindex::LevelIndex;
use crate::movement::ControlScheme;
use crate::physics::PhysicsBody;
use crate::scene::SceneResult;
use crate::settings::Settings;
use crate::soundmanager::SoundManager;

/*
 * Switches between the menu and levels.
 *
 * The menu itself is drawn by the host. While it's up there is no level, and
 * the host calls enter_level when the player picks one.
 */
pub struct StageManager {
    current: Option<Level>,
    levels: LevelIndex,
    settings: Settings,
    scheme: ControlScheme,
}

impl StageManager {
    pub fn new(files: &FileManager, scheme: ControlScheme) -> Result<StageManager> {
        let settings = Settings::load(files)?;
        let levels = LevelIndex::from_files(files)?;
        info!("found {} levels, settings {:?}", levels.len(), settings);
        Ok(StageManager {
            current: None,
            levels,
            settings,
            scheme,
        })
    }

    pub fn levels(&self) -> &LevelIndex {
        &self.levels
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.current.as_ref()
    }

    pub fn current_level_mut(&mut self) -> Option<&mut Level> {
        self.current.as_mut()
    }

    pub fn is_in_menu(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.current.as_ref().map(Level::is_frozen).unwrap_or(false)
    }

    pub fn enter_level(
        &mut self,
        name: &str,
        files: &FileManager,
        body: &mut dyn PhysicsBody,
    ) -> Result<()> {
        info!("entering level {}", name);
        let level = Level::new(name, files, self.scheme)?;
        level.place_player(body);
        self.current = Some(level);
        Ok(())
    }

    pub fn return_to_menu(&mut self) {
        info!("returning to menu");
        self.current = None;
    }

    pub fn set_paused(&mut self, paused: bool) {
        if let Some(level) = self.current.as_mut() {
            level.set_frozen(paused);
        }
    }

    pub fn set_volume(&mut self, volume: u8, files: &FileManager, sounds: &mut SoundManager) {
        self.settings.volume = volume.min(100);
        sounds.set_settings(&self.settings);
        self.save_settings(files);
    }

    fn toggle_fullscreen(&mut self, files: &FileManager) {
        self.settings.fullscreen = !self.settings.fullscreen;
        info!("fullscreen: {}", self.settings.fullscreen);
        self.save_settings(files);
    }

    fn save_settings(&self, files: &FileManager) {
        if let Err(e) = self.settings.save(files) {
            error!("unable to save settings: {:#}", e);
        }
    }

    pub fn update(
        &mut self,
        inputs: &InputSnapshot,
        body: &mut dyn PhysicsBody,
        delta_time: f64,
        files: &FileManager,
        sounds: &mut SoundManager,
    ) -> Result<()> {
        if inputs.fullscreen_clicked {
            self.toggle_fullscreen(files);
        }

        let Some(level) = self.current.as_mut() else {
            return Ok(());
        };

        if inputs.pause_clicked {
            let paused = !level.is_frozen();
            info!("paused: {}", paused);
            level.set_frozen(paused);
            return Ok(());
        }

        match level.update(inputs, body, delta_time, files, sounds) {
            SceneResult::Continue => {}
            SceneResult::SwitchToLevel { name } => self.enter_level(&name, files, body)?,
            SceneResult::ReturnToMenu => self.return_to_menu(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::constants::SETTINGS_PATH;
    use crate::geometry::vec2;
    use crate::leveldata::level_path;
    use crate::physics::testing::MockBody;

    fn level_xml(spawn_x: i32, send_to: &str) -> String {
        format!(
            r#"<map width="40" height="10" tilewidth="64" tileheight="64">
 <objectgroup name="special">
  <object id="1" x="{}" y="576" width="64" height="64">
   <properties><property name="type" value="player_spawn"/></properties>
  </object>
  <object id="2" x="1000" y="0" width="64" height="640">
   <properties>
    <property name="send_to" value="{}"/>
    <property name="type" value="level_end"/>
   </properties>
  </object>
 </objectgroup>
</map>"#,
            spawn_x, send_to
        )
    }

    fn files() -> FileManager {
        let files = FileManager::in_memory();
        files
            .write(&level_path("tutorial"), &level_xml(0, "caves"))
            .unwrap();
        files
            .write(&level_path("caves"), &level_xml(100, "menu"))
            .unwrap();
        files
            .write(&level_path("main_menu"), &level_xml(0, "tutorial"))
            .unwrap();
        files
    }

    #[test]
    fn starts_in_menu() {
        let files = files();
        let stages = StageManager::new(&files, ControlScheme::Keyboard).unwrap();
        assert!(stages.is_in_menu());
        assert_eq!(stages.levels().levels(), &["tutorial", "caves"]);
        assert_eq!(*stages.settings(), Settings::default());
    }

    #[test]
    fn level_ends_switch_and_return() {
        let files = files();
        let mut sounds = SoundManager::noop_manager();
        let mut body = MockBody::new(vec2(0.0, 0.0));
        let mut stages = StageManager::new(&files, ControlScheme::Keyboard).unwrap();
        let inputs = InputSnapshot::default();

        stages.enter_level("tutorial", &files, &mut body).unwrap();
        assert_eq!(body.position, vec2(32.0, 32.0));
        stages
            .update(&inputs, &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert_eq!(stages.current_level().map(Level::name), Some("tutorial"));

        body.position = vec2(1032.0, 320.0);
        stages
            .update(&inputs, &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert_eq!(stages.current_level().map(Level::name), Some("caves"));
        assert_eq!(body.position, vec2(132.0, 32.0));

        body.position = vec2(1032.0, 320.0);
        stages
            .update(&inputs, &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert!(stages.is_in_menu());
    }

    #[test]
    fn escape_toggles_pause() {
        let files = files();
        let mut sounds = SoundManager::noop_manager();
        let mut body = MockBody::new(vec2(0.0, 0.0));
        let mut stages = StageManager::new(&files, ControlScheme::Keyboard).unwrap();
        stages.enter_level("tutorial", &files, &mut body).unwrap();

        let escape = InputSnapshot {
            pause_clicked: true,
            ..Default::default()
        };
        stages
            .update(&escape, &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert!(stages.is_paused());

        // Paused levels ignore level ends.
        body.position = vec2(1032.0, 320.0);
        stages
            .update(&InputSnapshot::default(), &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert_eq!(stages.current_level().map(Level::name), Some("tutorial"));

        stages
            .update(&escape, &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert!(!stages.is_paused());
    }

    #[test]
    fn f11_saves_fullscreen() {
        let files = files();
        let mut sounds = SoundManager::noop_manager();
        let mut body = MockBody::new(vec2(0.0, 0.0));
        let mut stages = StageManager::new(&files, ControlScheme::Keyboard).unwrap();

        let f11 = InputSnapshot {
            fullscreen_clicked: true,
            ..Default::default()
        };
        stages
            .update(&f11, &mut body, 0.1, &files, &mut sounds)
            .unwrap();
        assert!(stages.settings().fullscreen);
        assert_eq!(
            files.read_to_string(Path::new(SETTINGS_PATH)).unwrap(),
            "volume;100\nfullscreen;1\n"
        );

        stages.set_volume(40, &files, &mut sounds);
        let reloaded = StageManager::new(&files, ControlScheme::Keyboard).unwrap();
        assert_eq!(
            *reloaded.settings(),
            Settings {
                volume: 40,
                fullscreen: true
            }
        );
    }

    #[test]
    fn unknown_level_is_an_error() {
        let files = files();
        let mut body = MockBody::new(vec2(0.0, 0.0));
        let mut stages = StageManager::new(&files, ControlScheme::Keyboard).unwrap();
        assert!(stages.enter_level("nowhere", &files, &mut body).is_err());
        assert!(stages.is_in_menu());
    }
}
