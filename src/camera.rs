use crate::constants::{CAMERA_BOX_HEIGHT, CAMERA_BOX_WIDTH, CAMERA_LERP, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::{lerp, vec2, Rect, Vec2};

/*
 * The world camera. It stays put while the player is inside a box around
 * the camera's center and eases toward the player once they leave it.
 */
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(position: Vec2) -> Camera {
        Camera {
            position,
            viewport: vec2(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = vec2(width, height);
    }

    pub fn follow(&mut self, player: Vec2) {
        let follow_box = Rect::from_center(player, CAMERA_BOX_WIDTH, CAMERA_BOX_HEIGHT);
        let target = follow_box.clamp(self.position);
        if target.x != self.position.x {
            self.position.x = lerp(self.position.x, target.x, CAMERA_LERP);
        }
        if target.y != self.position.y {
            self.position.y = lerp(self.position.y, target.y, CAMERA_LERP);
        }
    }

    // Window coordinates (origin bottom-left) to world coordinates.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position - self.viewport / 2.0
    }
}
