use log::{debug, info};
use num_traits::Zero;

use crate::constants::{
    ANIMATION_FPS, COYOTE_SPENT, COYOTE_TIME, IDLE_FRICTION, MOVING_FRICTION, PLAYER_JUMP_IMPULSE,
    PLAYER_MAX_HOR_SPEED, PLAYER_SPEED, POINTER_DEADZONE_X, POINTER_JUMP_THRESHOLD, TIME_TILL_TP,
    WALK_FRAMES,
};
use crate::geometry::{vec2, Vec2};
use crate::inputmanager::InputSnapshot;
use crate::physics::PhysicsBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Walk,
    Teleporting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    Keyboard,
    Pointer,
}

// What the player asked for this frame, in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub teleport: bool,
    pub pointer: Option<Vec2>,
}

impl ControlInput {
    pub fn from_snapshot(inputs: &InputSnapshot, pointer: Option<Vec2>) -> ControlInput {
        ControlInput {
            left: inputs.player_left_down,
            right: inputs.player_right_down,
            jump: inputs.player_jump_down,
            teleport: inputs.teleport_down,
            pointer,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub speed: f32,
    pub horizontal_speed_limit: f32,
    pub jump_impulse: f32,
    pub coyote_time_budget: f64,
    pub teleport_time: f64,
    pub pointer_deadzone_x: f32,
    pub pointer_jump_threshold: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        MovementConfig {
            speed: PLAYER_SPEED,
            horizontal_speed_limit: PLAYER_MAX_HOR_SPEED,
            jump_impulse: PLAYER_JUMP_IMPULSE,
            coyote_time_budget: COYOTE_TIME,
            teleport_time: TIME_TILL_TP,
            pointer_deadzone_x: POINTER_DEADZONE_X,
            pointer_jump_threshold: POINTER_JUMP_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MovementState {
    pub coyote_timer: f64, // Seconds since the last ground contact.
    pub teleport_charge: f64,
    pub facing: Facing,
    pub animation: AnimationState,
    pub frame: usize,
    frame_timer: f64,
}

impl MovementState {
    fn new() -> MovementState {
        MovementState {
            coyote_timer: 0.0,
            teleport_charge: 0.0,
            facing: Facing::Right,
            animation: AnimationState::Idle,
            frame: 0,
            frame_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementResult {
    Continue,
    // The teleport charge completed; send the player to the checkpoint.
    Respawn,
}

pub struct MovementController {
    pub config: MovementConfig,
    pub scheme: ControlScheme,
    pub state: MovementState,
}

impl MovementController {
    pub fn new(scheme: ControlScheme) -> MovementController {
        Self::with_config(scheme, MovementConfig::default())
    }

    pub fn with_config(scheme: ControlScheme, config: MovementConfig) -> MovementController {
        MovementController {
            config,
            scheme,
            state: MovementState::new(),
        }
    }

    // -1, 0 or 1.
    fn horizontal_intent(&self, input: &ControlInput, player: Vec2) -> i32 {
        match self.scheme {
            ControlScheme::Keyboard => {
                let mut intent = 0;
                if input.left {
                    intent -= 1;
                }
                if input.right {
                    intent += 1;
                }
                intent
            }
            ControlScheme::Pointer => match input.pointer {
                Some(pointer) if pointer.x - player.x > self.config.pointer_deadzone_x => 1,
                Some(pointer) if player.x - pointer.x > self.config.pointer_deadzone_x => -1,
                _ => 0,
            },
        }
    }

    fn jump_intent(&self, input: &ControlInput, player: Vec2) -> bool {
        match self.scheme {
            ControlScheme::Keyboard => input.jump,
            ControlScheme::Pointer => input
                .pointer
                .map(|pointer| pointer.y - player.y > self.config.pointer_jump_threshold)
                .unwrap_or(false),
        }
    }

    fn set_animation(&mut self, animation: AnimationState) {
        if self.state.animation != animation {
            self.state.animation = animation;
            self.state.frame = 0;
            self.state.frame_timer = 0.0;
        }
    }

    fn advance_frame(&mut self, delta_time: f64) {
        if self.state.animation != AnimationState::Walk {
            return;
        }
        self.state.frame_timer += delta_time;
        let frame_time = 1.0 / ANIMATION_FPS;
        while self.state.frame_timer >= frame_time {
            self.state.frame_timer -= frame_time;
            self.state.frame = (self.state.frame + 1) % WALK_FRAMES;
        }
    }

    pub fn attach(&self, body: &mut dyn PhysicsBody) {
        body.set_max_horizontal_velocity(self.config.horizontal_speed_limit);
    }

    pub fn update(
        &mut self,
        input: &ControlInput,
        body: &mut dyn PhysicsBody,
        delta_time: f64,
    ) -> MovementResult {
        if body.is_on_ground() {
            self.state.coyote_timer = 0.0;
        } else {
            self.state.coyote_timer += delta_time;
        }

        if input.teleport {
            self.set_animation(AnimationState::Teleporting);
            body.apply_force(Vec2::zero());
            body.set_friction(IDLE_FRICTION);
            self.state.teleport_charge += delta_time;
            if self.state.teleport_charge >= self.config.teleport_time {
                info!("teleport charged, respawning");
                self.state.teleport_charge = 0.0;
                return MovementResult::Respawn;
            }
            return MovementResult::Continue;
        }
        self.state.teleport_charge = 0.0;

        let player = body.position();
        let intent = self.horizontal_intent(input, player);

        if self.jump_intent(input, player)
            && self.state.coyote_timer <= self.config.coyote_time_budget
        {
            debug!("jump after {:.3}s off the ground", self.state.coyote_timer);
            body.apply_impulse(vec2(0.0, self.config.jump_impulse));
            self.state.coyote_timer = COYOTE_SPENT;
        }

        body.apply_force(vec2(intent as f32 * self.config.speed, 0.0));
        if intent != 0 {
            body.set_friction(MOVING_FRICTION);
            self.state.facing = if intent < 0 {
                Facing::Left
            } else {
                Facing::Right
            };
            self.set_animation(AnimationState::Walk);
        } else {
            body.set_friction(IDLE_FRICTION);
            self.set_animation(AnimationState::Idle);
        }
        self.advance_frame(delta_time);

        MovementResult::Continue
    }
}
