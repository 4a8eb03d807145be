use rand::random;

use crate::besttimes::time_string;
use crate::constants::{dev_record, BLINK_SPEED, HUD_CORNER_FPS, HUD_CORNER_FRAMES, HUD_SHAKE};
use crate::geometry::{vec2, Rect, Vec2};
use crate::leveldata::DisplayMarker;

/*
 * A board placed in the level that shows the last result for one race.
 *
 * The digits hold the most recent finish, the info line holds either the
 * stored best or a "new best!" banner. After a new best the digits blink
 * until the next result comes in.
 */
#[derive(Debug, Clone)]
pub struct TimerDisplay {
    pub bounds: Rect,
    pub race_id: i32,
    best_time: f64,
    digits: String,
    info: String,
    dev_record: Option<String>,
    blinking: bool,
    visual_time: f64,
}

impl TimerDisplay {
    pub fn new(marker: &DisplayMarker, level: &str) -> TimerDisplay {
        TimerDisplay {
            bounds: marker.bounds,
            race_id: marker.race_id,
            best_time: f64::INFINITY,
            digits: time_string(0.0),
            info: String::new(),
            dev_record: dev_record(level, marker.race_id)
                .map(|time| format!("Dev record: {}", time_string(time))),
            blinking: false,
            visual_time: 0.0,
        }
    }

    pub fn load_best(&mut self, best: Option<f64>) {
        let Some(best) = best else {
            return;
        };
        self.best_time = best;
        self.info = format!("best: {}", time_string(best));
    }

    pub fn show_result(&mut self, time: f64, best: f64, is_new_best: bool) {
        self.best_time = best;
        self.digits = time_string(time);
        if is_new_best {
            self.info = "new best!".to_owned();
        } else {
            self.info = format!("best: {}", time_string(best));
        }
        self.blinking = is_new_best;
    }

    pub fn update(&mut self, delta_time: f64) {
        self.visual_time += delta_time;
    }

    pub fn best_time(&self) -> f64 {
        self.best_time
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn dev_record(&self) -> Option<&str> {
        self.dev_record.as_deref()
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    pub fn digit_alpha(&self) -> u8 {
        if !self.blinking {
            return 255;
        }
        let wave = ((self.visual_time * BLINK_SPEED).sin() + 1.0) / 2.0;
        (wave * 255.0) as u8
    }
}

// The race clock in the screen corner.
#[derive(Debug, Clone)]
pub struct RaceHud {
    visual_time: f64,
    visible: bool,
    text: String,
    shake: Vec2,
    corner_frame: usize,
}

impl RaceHud {
    pub fn new() -> RaceHud {
        RaceHud {
            visual_time: 0.0,
            visible: false,
            text: hud_time_string(0.0),
            shake: vec2(0.0, 0.0),
            corner_frame: 0,
        }
    }

    pub fn update(&mut self, delta_time: f64, windup: f64, elapsed: f64) {
        self.visual_time += delta_time * windup;
        self.visible = windup != 0.0;
        if !self.visible {
            return;
        }

        let intensity = self.intensity();
        let jitter = || (random::<f32>() * 2.0 - 1.0) * HUD_SHAKE * intensity;
        self.shake = vec2(jitter(), jitter());
        self.text = hud_time_string(elapsed);
        self.corner_frame =
            (self.visual_time as f32 * HUD_CORNER_FPS * intensity) as usize % HUD_CORNER_FRAMES;
    }

    // Grows with time spent racing, capped at 1.
    pub fn intensity(&self) -> f32 {
        ((self.visual_time.sqrt() * 0.5) as f32).min(1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    // Offset of the shadow text behind the clock.
    pub fn shake(&self) -> Vec2 {
        self.shake
    }

    pub fn corner_frame(&self) -> usize {
        self.corner_frame
    }
}

impl Default for RaceHud {
    fn default() -> Self {
        Self::new()
    }
}

// Like time_string, but minutes aren't padded.
fn hud_time_string(time: f64) -> String {
    let full = time_string(time);
    match full.strip_prefix('0') {
        Some(rest) if !rest.starts_with(':') => rest.to_owned(),
        _ => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(race_id: i32) -> DisplayMarker {
        DisplayMarker {
            bounds: Rect {
                x: 0.0,
                y: 0.0,
                w: 192.0,
                h: 64.0,
            },
            race_id,
        }
    }

    #[test]
    fn starts_blank() {
        let display = TimerDisplay::new(&marker(3), "race");
        assert_eq!(display.digits(), "00:00:00");
        assert_eq!(display.info(), "");
        assert_eq!(display.best_time(), f64::INFINITY);
        assert_eq!(display.dev_record(), None);
        assert_eq!(display.digit_alpha(), 255);
    }

    #[test]
    fn dev_record_line() {
        let display = TimerDisplay::new(&marker(0), "tutorial");
        assert_eq!(display.dev_record(), Some("Dev record: 00:06:76"));
    }

    #[test]
    fn load_best() {
        let mut display = TimerDisplay::new(&marker(0), "race");
        display.load_best(None);
        assert_eq!(display.info(), "");
        display.load_best(Some(12.5));
        assert_eq!(display.info(), "best: 00:12:50");
        assert_eq!(display.best_time(), 12.5);
    }

    #[test]
    fn new_best_blinks() {
        let mut display = TimerDisplay::new(&marker(0), "race");
        display.show_result(5.5, 5.5, true);
        assert_eq!(display.digits(), "00:05:50");
        assert_eq!(display.info(), "new best!");
        assert!(display.is_blinking());

        // sin(0) is halfway.
        assert_eq!(display.digit_alpha(), 127);
        display.update(std::f64::consts::PI / 6.0);
        assert_eq!(display.digit_alpha(), 255);

        display.show_result(6.0, 5.5, false);
        assert_eq!(display.digits(), "00:06:00");
        assert_eq!(display.info(), "best: 00:05:50");
        assert!(!display.is_blinking());
        assert_eq!(display.digit_alpha(), 255);
    }

    #[test]
    fn hud_visibility_follows_windup() {
        let mut hud = RaceHud::new();
        assert!(!hud.is_visible());
        assert_eq!(hud.text(), "0:00:00");

        hud.update(0.5, 0.5, 65.25);
        assert!(hud.is_visible());
        assert_eq!(hud.text(), "1:05:25");
        assert!(hud.corner_frame() < HUD_CORNER_FRAMES);

        hud.update(0.5, 0.0, 70.0);
        assert!(!hud.is_visible());
        assert_eq!(hud.text(), "1:05:25");
    }

    #[test]
    fn hud_shake_is_bounded() {
        let mut hud = RaceHud::new();
        for _ in 0..200 {
            hud.update(0.1, 1.0, 1.0);
            assert!(hud.shake().x.abs() <= HUD_SHAKE * hud.intensity());
            assert!(hud.shake().y.abs() <= HUD_SHAKE * hud.intensity());
        }
        assert_eq!(hud.intensity(), 1.0);
    }

    #[test]
    fn hud_time_strings() {
        assert_eq!(hud_time_string(0.0), "0:00:00");
        assert_eq!(hud_time_string(754.5), "12:34:50");
    }
}
