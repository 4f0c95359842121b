//! Keyboard state
//!
//! Key-down/key-up events arrive whenever the host delivers them; the tick
//! reads a snapshot once per frame. Held keys map to driving intents, while
//! confirm is latched so one press starts exactly one run.

use crate::sim::{GameEvent, TickInput};

/// Logical actions the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Confirm,
}

impl Action {
    /// Map a DOM-style key code (`KeyboardEvent.code`) to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Action::Forward),
            "ArrowDown" | "KeyS" => Some(Action::Backward),
            "ArrowLeft" | "KeyA" => Some(Action::TurnLeft),
            "ArrowRight" | "KeyD" => Some(Action::TurnRight),
            "Enter" | "NumpadEnter" => Some(Action::Confirm),
            _ => None,
        }
    }
}

/// Pressed-state of every action
#[derive(Debug, Clone, Default)]
pub struct InputState {
    forward: bool,
    backward: bool,
    turn_left: bool,
    turn_right: bool,
    confirm: bool,
    /// Demo mode toggle
    pub autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was one of ours (host may suppress its default)
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_key_code(code) else {
            return false;
        };
        self.set(action, true);
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_key_code(code) else {
            return false;
        };
        // Confirm stays latched until the next snapshot
        if action != Action::Confirm {
            self.set(action, false);
        }
        true
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Forward => self.forward = pressed,
            Action::Backward => self.backward = pressed,
            Action::TurnLeft => self.turn_left = pressed,
            Action::TurnRight => self.turn_right = pressed,
            Action::Confirm => self.confirm = pressed,
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::TurnLeft => self.turn_left,
            Action::TurnRight => self.turn_right,
            Action::Confirm => self.confirm,
        }
    }

    /// Snapshot for the next tick; consumes a pending confirm
    pub fn to_tick_input(&mut self) -> TickInput {
        TickInput {
            forward: self.forward,
            backward: self.backward,
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            confirm: std::mem::take(&mut self.confirm),
            autopilot: self.autopilot,
        }
    }

    /// Release everything (autopilot is a mode, not a key, and survives)
    pub fn clear(&mut self) {
        *self = Self {
            autopilot: self.autopilot,
            ..Self::default()
        };
    }

    /// Drop held keys whenever a run starts
    pub fn observe(&mut self, events: &[GameEvent]) {
        if events.iter().any(|e| matches!(e, GameEvent::Started)) {
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key_code("KeyW"), Some(Action::Forward));
        assert_eq!(Action::from_key_code("ArrowDown"), Some(Action::Backward));
        assert_eq!(Action::from_key_code("KeyA"), Some(Action::TurnLeft));
        assert_eq!(Action::from_key_code("ArrowRight"), Some(Action::TurnRight));
        assert_eq!(Action::from_key_code("Enter"), Some(Action::Confirm));
        assert_eq!(Action::from_key_code("Space"), None);
    }

    #[test]
    fn test_held_keys_persist_across_snapshots() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowUp"));
        assert!(!input.key_down("KeyQ"));
        assert!(input.to_tick_input().forward);
        assert!(input.to_tick_input().forward);
        input.key_up("ArrowUp");
        assert!(!input.to_tick_input().forward);
    }

    #[test]
    fn test_confirm_is_latched_once() {
        let mut input = InputState::new();
        input.key_down("Enter");
        input.key_up("Enter");
        assert!(input.to_tick_input().confirm);
        assert!(!input.to_tick_input().confirm);
    }

    #[test]
    fn test_run_start_clears_intents() {
        let mut input = InputState::new();
        input.autopilot = true;
        input.key_down("KeyW");
        input.key_down("KeyD");
        input.observe(&[GameEvent::Started]);
        assert!(!input.is_pressed(Action::Forward));
        assert!(!input.is_pressed(Action::TurnRight));
        assert!(input.autopilot);
    }
}
