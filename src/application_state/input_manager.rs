//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse input state tracking
//! - Input state management

use std::collections::HashMap;

use super::input_state::{Key, MouseButton, MouseInput, ProcessedInputState, RawInputState};

/// Manages the state of all input devices.
///
/// The windowing layer feeds key, button and motion events in; once per
/// frame the engine pulls a `ProcessedInputState` out.
#[derive(Debug)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<Key, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<Key, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button released.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<Key, bool> = Key::ALL.iter().map(|key| (*key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<MouseButton, bool> =
            MouseButton::ALL.iter().map(|button| (*button, false)).collect();
        let mouse_button_inputs_new = mouse_button_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs: MouseInput {
                mouse_button_inputs_old,
                mouse_button_inputs_new,
                mouse_delta: None,
            },
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Records a key press or release.
    pub fn intake_key(&mut self, key: Key, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Records a mouse button press or release.
    pub fn intake_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
        }
    }

    /// Adds relative mouse motion to this frame's delta.
    ///
    /// Several motion events can arrive between frames; they are summed so
    /// none of the motion is lost.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns the processed input state and resets per-frame state.
    pub fn get_and_reset_processed_input(&mut self) -> Option<ProcessedInputState> {
        let processed_input = Some(self.create_processed_input_state());
        self.reset_inputs();
        processed_input
    }

    /// Rolls key states forward and clears the accumulated mouse motion.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }

    /// Releases every key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|state| *state = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|state| *state = false);
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_goes_pressed_then_held_then_released() {
        let mut manager = InputManager::new();

        manager.intake_key(Key::W, true);
        let first = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(first.get_key_state(Key::W), RawInputState::Pressed);

        let second = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(second.get_key_state(Key::W), RawInputState::Held);

        manager.intake_key(Key::W, false);
        let third = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(third.get_key_state(Key::W), RawInputState::Released);
    }

    #[test]
    fn mouse_motion_accumulates_until_reset() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((3.0, -1.0));
        manager.intake_mouse_motion((2.0, 4.0));

        let processed = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(processed.get_mouse_delta(), Some((5.0, 3.0)));

        let next = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(next.get_mouse_delta(), None);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut manager = InputManager::new();
        manager.intake_key(Key::Space, true);
        manager.intake_mouse_button(MouseButton::Left, true);
        manager.reset_inputs();

        manager.release_all();
        let processed = manager.create_processed_input_state();
        assert_eq!(processed.get_key_state(Key::Space), RawInputState::Released);
        assert_eq!(processed.get_mouse_button_state(MouseButton::Left), RawInputState::Released);
    }
}
