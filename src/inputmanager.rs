use std::collections::HashSet;

use log::debug;

use crate::geometry::{vec2, Vec2};

// The keys the game listens to. The host maps its own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardKey {
    Escape,
    Space,
    F11,
    W,
    A,
    D,
    R,
    Up,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

struct InputState {
    keys_down: HashSet<KeyboardKey>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: Option<Vec2>,
}

impl InputState {
    fn new() -> InputState {
        InputState {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: None,
        }
    }

    fn is_key_down(&self, key: KeyboardKey) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }
}

trait TransientBinaryInput {
    fn is_on(&self, state: &InputState) -> bool;
}

trait StatefulBinaryInput {
    fn update(&mut self, state: &InputState);
    fn is_on(&self) -> bool;
}

// Held for as long as the underlying input is held.
struct HeldInput<T: TransientBinaryInput> {
    on: bool,
    inner: T,
}

impl<T: TransientBinaryInput> StatefulBinaryInput for HeldInput<T> {
    fn update(&mut self, state: &InputState) {
        self.on = self.inner.is_on(state);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

// On for exactly one frame per press.
struct TriggerInput<T: TransientBinaryInput> {
    inner: T,
    already_pressed: bool,
    on: bool,
}

impl<T: TransientBinaryInput> StatefulBinaryInput for TriggerInput<T> {
    fn update(&mut self, state: &InputState) {
        let down = self.inner.is_on(state);
        self.on = down && !self.already_pressed;
        self.already_pressed = down;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

struct KeyInput(KeyboardKey);

impl TransientBinaryInput for KeyInput {
    fn is_on(&self, state: &InputState) -> bool {
        state.is_key_down(self.0)
    }
}

struct MouseButtonInput(MouseButton);

impl TransientBinaryInput for MouseButtonInput {
    fn is_on(&self, state: &InputState) -> bool {
        state.is_mouse_button_down(self.0)
    }
}

struct AnyOfInput(Vec<Box<dyn StatefulBinaryInput>>);

impl AnyOfInput {
    fn update(&mut self, state: &InputState) {
        for input in self.0.iter_mut() {
            input.update(state);
        }
    }

    fn is_on(&self) -> bool {
        self.0.iter().any(|input| input.is_on())
    }
}

fn key_held(key: KeyboardKey) -> Box<dyn StatefulBinaryInput> {
    Box::new(HeldInput {
        on: false,
        inner: KeyInput(key),
    })
}

fn key_trigger(key: KeyboardKey) -> Box<dyn StatefulBinaryInput> {
    Box::new(TriggerInput {
        inner: KeyInput(key),
        already_pressed: false,
        on: false,
    })
}

fn mouse_button_held(button: MouseButton) -> Box<dyn StatefulBinaryInput> {
    Box::new(HeldInput {
        on: false,
        inner: MouseButtonInput(button),
    })
}

struct Bindings {
    left: AnyOfInput,
    right: AnyOfInput,
    jump: AnyOfInput,
    teleport: AnyOfInput,
    pause: AnyOfInput,
    fullscreen: AnyOfInput,
}

impl Bindings {
    fn new() -> Bindings {
        Bindings {
            left: AnyOfInput(vec![
                key_held(KeyboardKey::A),
                key_held(KeyboardKey::Left),
            ]),
            right: AnyOfInput(vec![
                key_held(KeyboardKey::D),
                key_held(KeyboardKey::Right),
            ]),
            jump: AnyOfInput(vec![
                key_held(KeyboardKey::W),
                key_held(KeyboardKey::Up),
                key_held(KeyboardKey::Space),
            ]),
            // Right click doubles as the teleport key.
            teleport: AnyOfInput(vec![
                key_held(KeyboardKey::R),
                mouse_button_held(MouseButton::Right),
            ]),
            pause: AnyOfInput(vec![key_trigger(KeyboardKey::Escape)]),
            fullscreen: AnyOfInput(vec![key_trigger(KeyboardKey::F11)]),
        }
    }

    fn update(&mut self, state: &InputState) {
        self.left.update(state);
        self.right.update(state);
        self.jump.update(state);
        self.teleport.update(state);
        self.pause.update(state);
        self.fullscreen.update(state);
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub player_left_down: bool,
    pub player_right_down: bool,
    pub player_jump_down: bool,
    pub teleport_down: bool,
    pub pause_clicked: bool,
    pub fullscreen_clicked: bool,

    // Window coordinates, y up. None until the pointer has moved.
    pub pointer_position: Option<Vec2>,
}

pub struct InputManager {
    state: InputState,
    bindings: Bindings,
    previous_snapshot: Option<InputSnapshot>,
}

impl InputManager {
    pub fn new() -> InputManager {
        InputManager {
            state: InputState::new(),
            bindings: Bindings::new(),
            previous_snapshot: None,
        }
    }

    pub fn key_down(&mut self, key: KeyboardKey) {
        self.state.keys_down.insert(key);
    }

    pub fn key_up(&mut self, key: KeyboardKey) {
        self.state.keys_down.remove(&key);
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        self.state.mouse_buttons_down.insert(button);
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.state.mouse_buttons_down.remove(&button);
    }

    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        self.state.mouse_position = Some(vec2(x, y));
    }

    // Call once per frame.
    pub fn update(&mut self) -> InputSnapshot {
        self.bindings.update(&self.state);

        let snapshot = InputSnapshot {
            player_left_down: self.bindings.left.is_on(),
            player_right_down: self.bindings.right.is_on(),
            player_jump_down: self.bindings.jump.is_on(),
            teleport_down: self.bindings.teleport.is_on(),
            pause_clicked: self.bindings.pause.is_on(),
            fullscreen_clicked: self.bindings.fullscreen.is_on(),
            pointer_position: self.state.mouse_position,
        };
        if Some(snapshot) != self.previous_snapshot {
            debug!("{:?}", snapshot);
            self.previous_snapshot = Some(snapshot);
        }
        snapshot
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
