// Basic window size, used to map pointer positions into the world.
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

// Where things live on disk, relative to the assets root.
pub const LEVELS_DIR: &str = "assets/levels";
pub const SAVED_DIR: &str = "assets/saved";
pub const SETTINGS_PATH: &str = "assets/settings.txt";
pub const MAIN_MENU_LEVEL: &str = "main_menu";
pub const FIRST_LEVEL: &str = "tutorial";

// Player body, as registered with the physics engine.
pub const PLAYER_WIDTH: f32 = 42.0;
pub const PLAYER_HEIGHT: f32 = 64.0;
pub const PLAYER_MAX_HOR_SPEED: f32 = 350.0;

// Horizontal thrust. Binary, not proportional to input.
pub const PLAYER_SPEED: f32 = 4000.0;
pub const MOVING_FRICTION: f32 = 0.0;
pub const IDLE_FRICTION: f32 = 1.0;

// Jumping.
pub const PLAYER_JUMP_IMPULSE: f32 = 2000.0;
pub const COYOTE_TIME: f64 = 0.12; // Seconds after leaving the ground a jump still counts.
pub const COYOTE_SPENT: f64 = f64::INFINITY;

// Pointer control.
pub const POINTER_DEADZONE_X: f32 = 35.0;
pub const POINTER_JUMP_THRESHOLD: f32 = 90.0;

// Holding teleport this long sends you back to the checkpoint.
pub const TIME_TILL_TP: f64 = 0.5;

// Player appearance.
pub const ANIMATION_FPS: f64 = 10.0;
pub const WALK_FRAMES: usize = 4;

// Respawn slightly above the anchor so we don't land inside it.
pub const RESPAWN_Y_OFFSET: f32 = 16.0;

// Race clock audio cues.
pub const BLEEP_INTERVAL: f64 = 1.0;
pub const MINI_BLEEP_INTERVAL: f64 = 0.05;
pub const BLEEP_VOLUME: f32 = 0.5;
pub const MINI_BLEEP_VOLUME: f32 = 0.1;
pub const CUE_VOLUME: f32 = 0.5;

// HUD race clock.
pub const HUD_SHAKE: f32 = 10.0;
pub const HUD_CORNER_FRAMES: usize = 6;
pub const HUD_CORNER_FPS: f32 = 15.0;

// Timer displays blink this fast after a new best.
pub const BLINK_SPEED: f64 = 3.0;

// The world camera keeps the player inside this box and eases toward it.
pub const CAMERA_BOX_WIDTH: f32 = 200.0;
pub const CAMERA_BOX_HEIGHT: f32 = 150.0;
pub const CAMERA_LERP: f32 = 0.22;

// Settings defaults.
pub const DEFAULT_VOLUME: u8 = 100;

// Reference times set by the developers, shown next to each timer display.
pub const DEV_RECORDS: &[(&str, i32, f64)] = &[
    ("tutorial", 0, 6.761270900009549),
    ("race", 0, 5.88888888763),
    ("race", 1, 10.862115900003118),
];

pub fn dev_record(level: &str, race_id: i32) -> Option<f64> {
    DEV_RECORDS
        .iter()
        .find(|(name, id, _)| *name == level && *id == race_id)
        .map(|(_, _, time)| *time)
}
