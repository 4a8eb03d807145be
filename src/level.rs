use anyhow::Result;
use log::{debug, error, info, warn};
use num_traits::Zero;

use crate::besttimes::BestTimes;
use crate::camera::Camera;
use crate::constants::{
    BLEEP_VOLUME, CUE_VOLUME, MINI_BLEEP_VOLUME, PLAYER_HEIGHT, PLAYER_WIDTH,
};
use crate::filemanager::FileManager;
use crate::geometry::{vec2, Rect, Vec2};
use crate::inputmanager::InputSnapshot;
use crate::leveldata::{level_path, LevelData, LevelEnd, TextDisplay};
use crate::movement::{ControlInput, ControlScheme, MovementController, MovementResult};
use crate::physics::PhysicsBody;
use crate::racetimer::{RaceEvent, RaceMarker, RaceTimer, TimerCue};
use crate::scene::SceneResult;
use crate::soundmanager::{Sound, SoundManager};
use crate::timerdisplay::{RaceHud, TimerDisplay};

// The send_to value that leads back to the menu instead of another level.
const MENU_DESTINATION: &str = "menu";

pub fn player_bounds(position: Vec2) -> Rect {
    Rect::from_center(position, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/*
 * One play session of one level.
 *
 * The physics body lives outside; the level drives it through PhysicsBody
 * and reads its position back for contacts and the camera.
 */
pub struct Level {
    name: String,
    frozen: bool,

    spawn: Option<Vec2>,
    race_markers: Vec<RaceMarker>,
    level_ends: Vec<LevelEnd>,
    text_displays: Vec<TextDisplay>,
    displays: Vec<TimerDisplay>,

    movement: MovementController,
    timer: RaceTimer,
    best_times: BestTimes,
    camera: Camera,
    hud: RaceHud,
}

impl Level {
    pub fn new(name: &str, files: &FileManager, scheme: ControlScheme) -> Result<Level> {
        let data = LevelData::from_file(&level_path(name), files)?;
        Ok(Self::from_data(name, data, files, scheme))
    }

    pub fn from_data(
        name: &str,
        data: LevelData,
        files: &FileManager,
        scheme: ControlScheme,
    ) -> Level {
        let best_times = BestTimes::load(files, name).unwrap_or_else(|e| {
            warn!("ignoring saved times for {}: {:#}", name, e);
            BestTimes::new()
        });

        let mut displays: Vec<TimerDisplay> = data
            .timer_displays
            .iter()
            .map(|marker| TimerDisplay::new(marker, name))
            .collect();
        for display in displays.iter_mut() {
            display.load_best(best_times.get(display.race_id));
        }

        let spawn = data
            .player_spawn
            .map(|bottom| bottom + vec2(0.0, PLAYER_HEIGHT / 2.0));
        let camera = Camera::new(spawn.unwrap_or(Vec2::zero()));

        info!(
            "level {} ready with {} races and {} checkpoints",
            name,
            data.race_markers.len(),
            data.checkpoints.len()
        );

        Level {
            name: name.to_owned(),
            frozen: false,
            spawn,
            race_markers: data.race_markers,
            level_ends: data.level_ends,
            text_displays: data.text_displays,
            displays,
            movement: MovementController::new(scheme),
            timer: RaceTimer::new(data.checkpoints),
            best_times,
            camera,
            hud: RaceHud::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Where the player's center starts.
    pub fn spawn_position(&self) -> Option<Vec2> {
        self.spawn
    }

    pub fn place_player(&self, body: &mut dyn PhysicsBody) {
        self.movement.attach(body);
        if let Some(spawn) = self.spawn {
            body.set_position(spawn);
            body.set_velocity(Vec2::zero());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn timer(&self) -> &RaceTimer {
        &self.timer
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }

    pub fn displays(&self) -> &[TimerDisplay] {
        &self.displays
    }

    pub fn text_displays(&self) -> &[TextDisplay] {
        &self.text_displays
    }

    pub fn hud(&self) -> &RaceHud {
        &self.hud
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    // Called by the physics host when the player hits something deadly.
    pub fn on_hazard(&mut self, body: &mut dyn PhysicsBody) -> bool {
        debug!("hazard hit at {:?}", body.position());
        self.timer.respawn(body)
    }

    fn finish_race(&mut self, race_id: i32, elapsed: f64, files: &FileManager) {
        let is_new_best = self.best_times.record(race_id, elapsed);
        if is_new_best {
            info!("new best for race {}: {}", race_id, elapsed);
            if let Err(e) = self.best_times.save(files, &self.name) {
                error!("unable to save best time for {}: {:#}", self.name, e);
            }
        }
        let best = self.best_times.best_or_infinity(race_id);
        for display in self.displays.iter_mut() {
            if display.race_id == race_id {
                display.show_result(elapsed, best, is_new_best);
            }
        }
    }

    fn handle_contacts(
        &mut self,
        player_rect: Rect,
        files: &FileManager,
        sounds: &mut SoundManager,
    ) -> SceneResult {
        let touched: Vec<usize> = self
            .timer
            .checkpoints()
            .iter()
            .enumerate()
            .filter(|(_, checkpoint)| checkpoint.bounds.intersects(player_rect))
            .map(|(i, _)| i)
            .collect();
        for i in touched {
            if self.timer.touch_checkpoint(i) {
                sounds.play(Sound::ActivateCheckpoint, CUE_VOLUME);
            }
        }

        let events: Vec<RaceEvent> = self
            .race_markers
            .iter()
            .filter(|marker| marker.bounds.intersects(player_rect))
            .filter_map(|marker| self.timer.touch_marker(marker))
            .collect();
        for event in events {
            match event {
                RaceEvent::Started { .. } => sounds.play(Sound::RaceStart, CUE_VOLUME),
                RaceEvent::Finished { race_id, elapsed } => {
                    self.finish_race(race_id, elapsed, files)
                }
            }
        }

        let Some(end) = self
            .level_ends
            .iter()
            .find(|end| end.bounds.intersects(player_rect))
        else {
            return SceneResult::Continue;
        };
        info!("level {} ended, sending to {:?}", self.name, &end.send_to);
        if end.send_to == MENU_DESTINATION {
            SceneResult::ReturnToMenu
        } else {
            SceneResult::SwitchToLevel {
                name: end.send_to.clone(),
            }
        }
    }

    pub fn update(
        &mut self,
        inputs: &InputSnapshot,
        body: &mut dyn PhysicsBody,
        delta_time: f64,
        files: &FileManager,
        sounds: &mut SoundManager,
    ) -> SceneResult {
        if self.frozen {
            return SceneResult::Continue;
        }

        let pointer = inputs
            .pointer_position
            .map(|screen| self.camera.screen_to_world(screen));
        // Advance the clock before movement: a respawn this frame leaves it at zero.
        for cue in self.timer.update(delta_time) {
            match cue {
                TimerCue::Bleep => sounds.play(Sound::TimerBleep, BLEEP_VOLUME),
                TimerCue::MiniBleep => sounds.play(Sound::TimerBleep, MINI_BLEEP_VOLUME),
            }
        }

        let control = ControlInput::from_snapshot(inputs, pointer);
        if self.movement.update(&control, body, delta_time) == MovementResult::Respawn {
            self.timer.respawn(body);
        }

        self.camera.follow(body.position());

        let result = self.handle_contacts(player_bounds(body.position()), files, sounds);

        for display in self.displays.iter_mut() {
            display.update(delta_time);
        }

        self.hud
            .update(delta_time, self.timer.windup(), self.timer.elapsed());

        result
    }
}
