mod args;
mod besttimes;
mod camera;
mod constants;
mod filemanager;
mod geometry;
mod inputmanager;
mod level;
mod leveldata;
mod levelindex;
mod movement;
mod physics;
mod properties;
mod racetimer;
mod scene;
mod settings;
mod soundmanager;
mod stagemanager;
mod timerdisplay;

pub use constants::{
    dev_record, COYOTE_TIME, FIRST_LEVEL, MAIN_MENU_LEVEL, SCREEN_HEIGHT, SCREEN_WIDTH,
    TIME_TILL_TP,
};

pub use args::{Args, Command};
pub use besttimes::{best_times_path, time_string, BestTimes, BestTimesError};
pub use camera::Camera;
pub use filemanager::FileManager;
pub use geometry::{vec2, Rect, Vec2};
pub use inputmanager::{InputManager, InputSnapshot, KeyboardKey, MouseButton};
pub use level::{player_bounds, Level};
pub use leveldata::{level_path, DisplayMarker, LevelData, LevelEnd, TextDisplay};
pub use levelindex::LevelIndex;
pub use movement::{
    AnimationState, ControlInput, ControlScheme, Facing, MovementConfig, MovementController,
    MovementResult, MovementState,
};
pub use physics::PhysicsBody;
pub use racetimer::{
    Checkpoint, MarkerKind, RaceEvent, RaceMarker, RacePhase, RaceTimer, RespawnAnchor, TimerCue,
};
pub use scene::SceneResult;
pub use settings::Settings;
pub use soundmanager::{NoopSoundPlayer, Sound, SoundManager, SoundPlayer};
pub use stagemanager::StageManager;
pub use timerdisplay::{RaceHud, TimerDisplay};
